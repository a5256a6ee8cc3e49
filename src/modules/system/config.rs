use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::models::AppConfig;

const CONFIG_FILE: &str = "config.json";

/// Directory holding the optional `config.json`, the credentials file and `logs/`.
/// `DATA_DIR` overrides the working directory.
pub fn get_data_dir() -> Result<PathBuf, String> {
    if let Ok(env_path) = std::env::var("DATA_DIR") {
        if !env_path.trim().is_empty() {
            let data_dir = PathBuf::from(env_path.trim());
            if !data_dir.exists() {
                fs::create_dir_all(&data_dir)
                    .map_err(|e| format!("failed_to_create_data_dir: {}", e))?;
            }
            return Ok(data_dir);
        }
    }
    std::env::current_dir().map_err(|e| format!("failed_to_resolve_working_dir: {}", e))
}

pub fn load_app_config() -> Result<AppConfig, String> {
    let data_dir = get_data_dir()?;
    let config_path = data_dir.join(CONFIG_FILE);

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No {} in {:?}, using defaults", CONFIG_FILE, data_dir);
            return Ok(AppConfig::new());
        }
        Err(e) => return Err(format!("failed_to_read_config_file: {}", e)),
    };
    serde_json::from_str(&content).map_err(|e| format!("failed_to_parse_config_file: {}", e))
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn apply_env_overrides(config: &mut AppConfig) {
    if let Some(id) = env_value("VS_CREDENTIALS_ID") {
        info!("Using credentials id from environment: {}", id);
        config.credentials_id = id;
    }
    if let Some(document) = env_value("VS_DOCUMENT_NAME") {
        info!("Using document name from environment: {}", document);
        config.document_name = document;
    }
    // Present-but-empty is meaningful here: it selects the first worksheet.
    if let Ok(worksheet) = std::env::var("VS_WORKSHEET_NAME") {
        info!("Using worksheet name from environment: {:?}", worksheet);
        config.worksheet_name = worksheet.trim().to_string();
    }
    if let Some(network) = env_value("VS_NETWORK_NAME") {
        info!("Using network name from environment: {}", network);
        config.network_name = network;
    }
    if let Some(raw) = env_value("VS_REQUEST_TIMEOUT") {
        match raw.parse::<u64>() {
            Ok(timeout) => {
                info!("Using request timeout from environment: {}s", timeout);
                config.request_timeout = timeout;
            }
            Err(_) => warn!("Ignoring invalid request timeout value: {}", raw),
        }
    }
}
