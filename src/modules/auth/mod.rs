pub mod oauth;
pub mod service_account;

use std::path::PathBuf;

use crate::error::{AppError, AppResult};
use crate::models::{ApiEndpointsConfig, AppConfig};
use crate::modules::sheets::{Authenticator, GoogleSheetsClient};
use crate::modules::system::logger;

/// Authorizes against Google with a service-account key file stored as
/// `<credentials_dir>/<credentials_id>.json`.
#[derive(Debug, Clone)]
pub struct GoogleAuthenticator {
    credentials_dir: PathBuf,
    request_timeout: u64,
    api: ApiEndpointsConfig,
}

impl GoogleAuthenticator {
    pub fn new(credentials_dir: PathBuf, request_timeout: u64, api: ApiEndpointsConfig) -> Self {
        Self {
            credentials_dir,
            request_timeout,
            api,
        }
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let credentials_dir = match config.credentials_dir.as_deref() {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => crate::modules::system::config::get_data_dir().map_err(AppError::Config)?,
        };
        Ok(Self::new(
            credentials_dir,
            config.request_timeout,
            config.api.clone(),
        ))
    }
}

impl Authenticator for GoogleAuthenticator {
    type Client = GoogleSheetsClient;

    async fn authorize(&self, credentials_id: &str) -> AppResult<GoogleSheetsClient> {
        let fail = |reason: String| AppError::authorization(credentials_id, reason);

        let path = service_account::credentials_path(&self.credentials_dir, credentials_id);
        let key = service_account::load_key(&path).await.map_err(fail)?;
        let assertion =
            service_account::build_assertion(&key, chrono::Utc::now().timestamp()).map_err(fail)?;

        let http = crate::utils::http::build_client(self.request_timeout).map_err(fail)?;
        let token = oauth::exchange_assertion(&http, key.token_uri(), &assertion)
            .await
            .map_err(fail)?;

        logger::log_info(&format!(
            "Authorized service account {} using credentials '{}'",
            key.client_email, credentials_id
        ));
        Ok(GoogleSheetsClient::new(
            http,
            token.access_token,
            self.api.clone(),
        ))
    }
}
