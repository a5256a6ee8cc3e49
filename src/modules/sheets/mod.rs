//! Capability interface over the spreadsheet service.
//!
//! The reporter only needs to open a document by name, resolve one of its
//! worksheets and append a row to it. Leaf operations report failures as
//! plain strings; the reporter attaches the document and worksheet names.

pub mod google;

use serde_json::Value;

use crate::error::AppResult;

pub use google::{GoogleDocument, GoogleSheetsClient, GoogleWorksheet};

#[allow(async_fn_in_trait)]
pub trait Authenticator {
    type Client: SpreadsheetClient;

    /// Resolves `credentials_id` into an authorized client. Failures are
    /// always `AppError::Authorization`.
    async fn authorize(&self, credentials_id: &str) -> AppResult<Self::Client>;
}

#[allow(async_fn_in_trait)]
pub trait SpreadsheetClient {
    type Document: SpreadsheetDocument;

    async fn open(&self, document_name: &str) -> Result<Self::Document, String>;
}

#[allow(async_fn_in_trait)]
pub trait SpreadsheetDocument {
    type Worksheet: Worksheet;

    /// An empty name selects the first worksheet.
    async fn worksheet(&self, worksheet_name: &str) -> Result<Self::Worksheet, String>;
}

#[allow(async_fn_in_trait)]
pub trait Worksheet {
    fn title(&self) -> &str;

    /// Appends `cells` as the next row in a single call.
    async fn append_row(&self, cells: &[Value]) -> Result<(), String>;
}
