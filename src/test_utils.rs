use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::modules::sheets::{Authenticator, SpreadsheetClient, SpreadsheetDocument, Worksheet};

pub(crate) const TEST_RSA_PRIVATE_PEM: &str = include_str!("../testdata/test_rsa_private.pem");
pub(crate) const TEST_RSA_PUBLIC_PEM: &str = include_str!("../testdata/test_rsa_public.pem");

fn global_env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

pub(crate) fn lock_env() -> MutexGuard<'static, ()> {
    global_env_lock()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) struct ScopedEnvVar {
    key: &'static str,
    original: Option<String>,
}

impl ScopedEnvVar {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        std::env::set_var(key, value);
        Self { key, original }
    }

    pub(crate) fn unset(key: &'static str) -> Self {
        let original = std::env::var(key).ok();
        std::env::remove_var(key);
        Self { key, original }
    }
}

impl Drop for ScopedEnvVar {
    fn drop(&mut self) {
        if let Some(value) = self.original.as_deref() {
            std::env::set_var(self.key, value);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Writes a service-account key file named `<credentials_id>.json` into `dir`.
pub(crate) fn write_service_account_key(dir: &Path, credentials_id: &str, token_uri: &str) {
    let key = serde_json::json!({
        "type": "service_account",
        "project_id": "validator-metrics",
        "private_key_id": "test-key-id",
        "private_key": TEST_RSA_PRIVATE_PEM,
        "client_email": "metrics@validator-metrics.iam.gserviceaccount.com",
        "client_id": "1234567890",
        "token_uri": token_uri,
    });
    std::fs::write(
        dir.join(format!("{}.json", credentials_id)),
        serde_json::to_string_pretty(&key).expect("serialize key"),
    )
    .expect("write key file");
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AppendedRow {
    pub document: String,
    pub worksheet: String,
    pub cells: Vec<Value>,
}

/// In-memory spreadsheet service. Clones share the recorded calls.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeSpreadsheetService {
    accepted_credentials: Vec<String>,
    documents: Vec<(String, Vec<String>)>,
    fail_append: bool,
    authorize_calls: Arc<Mutex<Vec<String>>>,
    appended: Arc<Mutex<Vec<AppendedRow>>>,
}

impl FakeSpreadsheetService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn accept_credentials(mut self, credentials_id: &str) -> Self {
        self.accepted_credentials.push(credentials_id.to_string());
        self
    }

    pub(crate) fn with_document(mut self, name: &str, worksheets: &[&str]) -> Self {
        self.documents.push((
            name.to_string(),
            worksheets.iter().map(|w| w.to_string()).collect(),
        ));
        self
    }

    pub(crate) fn failing_append(mut self) -> Self {
        self.fail_append = true;
        self
    }

    pub(crate) fn authorize_calls(&self) -> Vec<String> {
        self.authorize_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub(crate) fn appended_rows(&self) -> Vec<AppendedRow> {
        self.appended
            .lock()
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }
}

impl Authenticator for FakeSpreadsheetService {
    type Client = FakeClient;

    async fn authorize(&self, credentials_id: &str) -> AppResult<FakeClient> {
        if let Ok(mut calls) = self.authorize_calls.lock() {
            calls.push(credentials_id.to_string());
        }
        if !self.accepted_credentials.iter().any(|c| c == credentials_id) {
            return Err(AppError::authorization(
                credentials_id,
                format!("credentials file '{}.json' not found", credentials_id),
            ));
        }
        Ok(FakeClient {
            service: self.clone(),
        })
    }
}

pub(crate) struct FakeClient {
    service: FakeSpreadsheetService,
}

pub(crate) struct FakeDocument {
    service: FakeSpreadsheetService,
    name: String,
    worksheets: Vec<String>,
}

pub(crate) struct FakeWorksheet {
    service: FakeSpreadsheetService,
    document: String,
    title: String,
}

impl SpreadsheetClient for FakeClient {
    type Document = FakeDocument;

    async fn open(&self, document_name: &str) -> Result<FakeDocument, String> {
        self.service
            .documents
            .iter()
            .find(|(name, _)| name == document_name)
            .map(|(name, worksheets)| FakeDocument {
                service: self.service.clone(),
                name: name.clone(),
                worksheets: worksheets.clone(),
            })
            .ok_or_else(|| format!("spreadsheet '{}' not found", document_name))
    }
}

impl SpreadsheetDocument for FakeDocument {
    type Worksheet = FakeWorksheet;

    async fn worksheet(&self, worksheet_name: &str) -> Result<FakeWorksheet, String> {
        let title = if worksheet_name.is_empty() {
            self.worksheets.first()
        } else {
            self.worksheets.iter().find(|w| *w == worksheet_name)
        };
        title
            .map(|title| FakeWorksheet {
                service: self.service.clone(),
                document: self.name.clone(),
                title: title.clone(),
            })
            .ok_or_else(|| format!("worksheet '{}' not found", worksheet_name))
    }
}

impl Worksheet for FakeWorksheet {
    fn title(&self) -> &str {
        &self.title
    }

    async fn append_row(&self, cells: &[Value]) -> Result<(), String> {
        if self.service.fail_append {
            return Err("append rejected: 403 PERMISSION_DENIED".to_string());
        }
        if let Ok(mut rows) = self.service.appended.lock() {
            rows.push(AppendedRow {
                document: self.document.clone(),
                worksheet: self.title.clone(),
                cells: cells.to_vec(),
            });
        }
        Ok(())
    }
}
