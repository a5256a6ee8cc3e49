use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DRIVE_BASE_URL, DEFAULT_SHEETS_BASE_URL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_credentials_id")]
    pub credentials_id: String,
    /// Directory holding `<credentials_id>.json`. Defaults to the working directory.
    #[serde(default)]
    pub credentials_dir: Option<String>,
    #[serde(default = "default_document_name")]
    pub document_name: String,
    /// Empty selects the first worksheet of the document.
    #[serde(default)]
    pub worksheet_name: String,
    #[serde(default = "default_network_name")]
    pub network_name: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    #[serde(default)]
    pub api: ApiEndpointsConfig,
}

fn default_credentials_id() -> String {
    "SovrinNetworkStatus".to_string()
}

fn default_document_name() -> String {
    "Test Log".to_string()
}

fn default_network_name() -> String {
    "Sovrin Main Net".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEndpointsConfig {
    #[serde(default = "default_drive_base_url")]
    pub drive_base_url: String,
    #[serde(default = "default_sheets_base_url")]
    pub sheets_base_url: String,
}

fn default_drive_base_url() -> String {
    DEFAULT_DRIVE_BASE_URL.to_string()
}

fn default_sheets_base_url() -> String {
    DEFAULT_SHEETS_BASE_URL.to_string()
}

impl ApiEndpointsConfig {
    pub fn new() -> Self {
        Self {
            drive_base_url: default_drive_base_url(),
            sheets_base_url: default_sheets_base_url(),
        }
    }
}

impl Default for ApiEndpointsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            credentials_id: default_credentials_id(),
            credentials_dir: None,
            document_name: default_document_name(),
            worksheet_name: String::new(),
            network_name: default_network_name(),
            request_timeout: default_request_timeout(),
            api: ApiEndpointsConfig::new(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
