use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authorization error for credentials '{credentials_id}': {reason}")]
    Authorization {
        credentials_id: String,
        reason: String,
    },

    #[error("Sheet access error for document '{document}', worksheet '{worksheet}': {reason}")]
    SheetAccess {
        document: String,
        worksheet: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(String),
}

impl AppError {
    pub fn authorization(credentials_id: &str, reason: impl Into<String>) -> Self {
        Self::Authorization {
            credentials_id: credentials_id.to_string(),
            reason: reason.into(),
        }
    }

    pub fn sheet_access(document: &str, worksheet: &str, reason: impl Into<String>) -> Self {
        Self::SheetAccess {
            document: document.to_string(),
            worksheet: worksheet.to_string(),
            reason: reason.into(),
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}
pub type AppResult<T> = Result<T, AppError>;
