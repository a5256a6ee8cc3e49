use crate::models::{ApiEndpointsConfig, AppConfig};
use std::fmt;

#[derive(Debug, Clone)]
pub struct ConfigError {
    pub field: String,
    pub message: String,
    pub actual_value: Option<String>,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.actual_value {
            Some(val) => write!(f, "  • {}: {} (got: {})", self.field, self.message, val),
            None => write!(f, "  • {}: {}", self.field, self.message),
        }
    }
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            actual_value: None,
        }
    }

    fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            actual_value: Some(value.to_string()),
        }
    }
}

pub fn validate_app_config(config: &AppConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let credentials_id = config.credentials_id.trim();
    if credentials_id.is_empty() {
        errors.push(ConfigError::new("credentials_id", "must not be empty"));
    } else if credentials_id.contains(['/', '\\']) || credentials_id.ends_with(".json") {
        errors.push(ConfigError::with_value(
            "credentials_id",
            "must be a bare file name without directory or .json extension",
            credentials_id,
        ));
    }
    if config.document_name.trim().is_empty() {
        errors.push(ConfigError::new("document_name", "must not be empty"));
    }
    if config.network_name.trim().is_empty() {
        errors.push(ConfigError::new("network_name", "must not be empty"));
    }
    if config.request_timeout == 0 {
        errors.push(ConfigError::with_value(
            "request_timeout",
            "must be greater than 0",
            config.request_timeout,
        ));
    } else if config.request_timeout > 600 {
        errors.push(ConfigError::with_value(
            "request_timeout",
            "should not exceed 600 seconds (10 minutes)",
            config.request_timeout,
        ));
    }
    validate_api_endpoints(&config.api, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_api_endpoints(api: &ApiEndpointsConfig, errors: &mut Vec<ConfigError>) {
    for (field, value) in [
        ("api.drive_base_url", &api.drive_base_url),
        ("api.sheets_base_url", &api.sheets_base_url),
    ] {
        match url::Url::parse(value) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(_) => errors.push(ConfigError::with_value(
                field,
                "must use http or https",
                value,
            )),
            Err(_) => errors.push(ConfigError::with_value(field, "must be a valid URL", value)),
        }
    }
}

pub fn format_errors(errors: &[ConfigError]) -> String {
    format!(
        "configuration_validation_failed:\n{}",
        errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    )
}
