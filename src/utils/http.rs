use reqwest::Client;
use std::time::Duration;

#[cfg(not(any(feature = "tls-native", feature = "tls-rustls")))]
compile_error!("one TLS backend feature must be enabled: `tls-native` or `tls-rustls`");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TlsBackendSelection {
    NativeTls,
    Rustls,
}

fn parse_tls_backend(raw: &str) -> Option<TlsBackendSelection> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "native" | "native-tls" | "default-tls" => Some(TlsBackendSelection::NativeTls),
        "rustls" => Some(TlsBackendSelection::Rustls),
        _ => None,
    }
}

fn supports_tls_backend(selection: TlsBackendSelection) -> bool {
    match selection {
        TlsBackendSelection::NativeTls => cfg!(feature = "tls-native"),
        TlsBackendSelection::Rustls => cfg!(feature = "tls-rustls"),
    }
}

fn compiled_default_tls_backend() -> TlsBackendSelection {
    if cfg!(feature = "tls-native") {
        TlsBackendSelection::NativeTls
    } else {
        TlsBackendSelection::Rustls
    }
}

fn selected_tls_backend() -> TlsBackendSelection {
    if let Some(requested) = std::env::var("TLS_BACKEND")
        .ok()
        .as_deref()
        .and_then(parse_tls_backend)
    {
        if supports_tls_backend(requested) {
            return requested;
        }
        tracing::warn!(
            "TLS_BACKEND requested an unavailable backend for this build; falling back to compiled default"
        );
    }
    compiled_default_tls_backend()
}

pub fn tls_backend_name() -> &'static str {
    match selected_tls_backend() {
        TlsBackendSelection::NativeTls => "native-tls",
        TlsBackendSelection::Rustls => "rustls",
    }
}

fn apply_tls_backend(builder: reqwest::ClientBuilder) -> reqwest::ClientBuilder {
    match selected_tls_backend() {
        TlsBackendSelection::NativeTls => builder,
        TlsBackendSelection::Rustls => {
            #[cfg(feature = "tls-rustls")]
            {
                builder.use_rustls_tls()
            }
            #[cfg(not(feature = "tls-rustls"))]
            {
                builder
            }
        }
    }
}

/// Builds a client whose every request is bounded by `timeout_secs`.
pub fn build_client(timeout_secs: u64) -> Result<Client, String> {
    apply_tls_backend(Client::builder())
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(crate::constants::USER_AGENT.as_str())
        .build()
        .map_err(|e| format!("failed_to_build_http_client: {}", e))
}

/// Formats a transport failure, flagging timeouts explicitly.
pub fn describe_request_error(context: &str, e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("{} timed out: {}", context, e)
    } else if e.is_connect() {
        format!(
            "{} failed: {}. Unable to connect to Google services, check network settings.",
            context, e
        )
    } else {
        format!("{} failed: {}", context, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{lock_env, ScopedEnvVar};
    use axum::{http::HeaderMap, routing::get, Router};
    use tokio::net::TcpListener;

    #[test]
    fn parse_tls_backend_handles_supported_labels() {
        assert_eq!(
            parse_tls_backend("native-tls"),
            Some(TlsBackendSelection::NativeTls)
        );
        assert_eq!(parse_tls_backend(" Rustls "), Some(TlsBackendSelection::Rustls));
        assert_eq!(parse_tls_backend("openssl"), None);
    }

    #[test]
    fn unsupported_override_falls_back_to_compiled_backend() {
        let _guard = lock_env();
        let _backend = ScopedEnvVar::set("TLS_BACKEND", "bogus");
        let name = tls_backend_name();
        assert!(name == "native-tls" || name == "rustls");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn client_sends_crate_user_agent() {
        let app = Router::new().route(
            "/ua",
            get(|headers: HeaderMap| async move {
                headers
                    .get(reqwest::header::USER_AGENT)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string()
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener local addr");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve ua test app");
        });

        let client = build_client(5).expect("build client");
        let ua = client
            .get(format!("http://{}/ua", addr))
            .send()
            .await
            .expect("request should succeed")
            .text()
            .await
            .expect("read body");
        server.abort();

        assert_eq!(ua, crate::constants::USER_AGENT.as_str());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn unreachable_host_is_described_as_failure() {
        let client = build_client(1).expect("build client");
        let err = client
            .get("http://127.0.0.1:9/unreachable")
            .send()
            .await
            .expect_err("nothing listens on the discard port");
        let message = describe_request_error("Status check", &err);
        assert!(message.starts_with("Status check "));
    }
}
