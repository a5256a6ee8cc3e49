use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::constants::{scope_string, DEFAULT_TOKEN_URL};

const ASSERTION_LIFETIME_SECONDS: i64 = 3600;
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// The fields of a Google service-account JSON key that are needed to
/// obtain an access token.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl ServiceAccountKey {
    pub fn token_uri(&self) -> &str {
        self.token_uri
            .as_deref()
            .filter(|uri| !uri.trim().is_empty())
            .unwrap_or(DEFAULT_TOKEN_URL)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn grant_type() -> &'static str {
    JWT_BEARER_GRANT
}

pub fn credentials_path(dir: &Path, credentials_id: &str) -> PathBuf {
    dir.join(format!("{}.json", credentials_id))
}

pub async fn load_key(path: &Path) -> Result<ServiceAccountKey, String> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => format!("credentials file {:?} is missing", path),
        _ => format!("failed_to_read_credentials_file: {}", e),
    })?;
    parse_key(&content)
}

pub fn parse_key(content: &str) -> Result<ServiceAccountKey, String> {
    let key: ServiceAccountKey = serde_json::from_str(content)
        .map_err(|e| format!("failed_to_parse_credentials_file: {}", e))?;

    if let Some(kind) = key.key_type.as_deref() {
        if kind != "service_account" {
            return Err(format!(
                "credentials file has type '{}', expected 'service_account'",
                kind
            ));
        }
    }
    if key.client_email.trim().is_empty() {
        return Err("credentials file has an empty client_email".to_string());
    }
    Ok(key)
}

/// Signs the RS256 bearer assertion exchanged for an access token.
pub fn build_assertion(key: &ServiceAccountKey, now_unix: i64) -> Result<String, String> {
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| format!("invalid_private_key: {}", e))?;

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let claims = AssertionClaims {
        iss: key.client_email.clone(),
        scope: scope_string(),
        aud: key.token_uri().to_string(),
        iat: now_unix,
        exp: now_unix + ASSERTION_LIFETIME_SECONDS,
    };

    encode(&header, &claims, &encoding_key).map_err(|e| format!("failed_to_sign_assertion: {}", e))
}
