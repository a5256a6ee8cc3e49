use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::modules::system::logger;
use crate::utils::http::describe_request_error;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: String,
}

/// Exchanges a signed service-account assertion for a bearer token.
pub async fn exchange_assertion(
    client: &Client,
    token_uri: &str,
    assertion: &str,
) -> Result<TokenResponse, String> {
    let params = [
        ("grant_type", super::service_account::grant_type()),
        ("assertion", assertion),
    ];

    let response = client
        .post(token_uri)
        .form(&params)
        .send()
        .await
        .map_err(|e| describe_request_error("Token exchange request", &e))?;

    if response.status().is_success() {
        let token_res = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| format!("Token parsing failed: {}", e))?;
        if token_res.access_token.trim().is_empty() {
            return Err("Token exchange returned an empty access_token".to_string());
        }
        logger::log_info(&format!(
            "Token exchange successful! Expires in: {} seconds",
            token_res.expires_in
        ));
        Ok(token_res)
    } else {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        Err(format!("Token exchange failed ({}): {}", status, error_text))
    }
}
