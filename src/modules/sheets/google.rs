use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use super::{SpreadsheetClient, SpreadsheetDocument, Worksheet};
use crate::constants::SPREADSHEET_MIME_TYPE;
use crate::models::ApiEndpointsConfig;
use crate::utils::http::describe_request_error;

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Clone, Deserialize)]
struct SheetProperties {
    #[serde(rename = "sheetId", default)]
    sheet_id: i64,
    title: String,
    #[serde(default)]
    index: i64,
}

/// Authorized handle on the Drive and Sheets REST APIs.
#[derive(Clone)]
pub struct GoogleSheetsClient {
    http: Client,
    access_token: String,
    api: ApiEndpointsConfig,
}

impl GoogleSheetsClient {
    pub fn new(http: Client, access_token: String, api: ApiEndpointsConfig) -> Self {
        Self {
            http,
            access_token,
            api,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, String> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| describe_request_error(context, &e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("{} failed ({}): {}", context, status, error_text));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| format!("{} parsing failed: {}", context, e))
    }
}

fn endpoint(base: &str, segments: &[&str]) -> Result<Url, String> {
    let mut url = Url::parse(base).map_err(|e| format!("invalid API base url {}: {}", base, e))?;
    url.path_segments_mut()
        .map_err(|_| format!("API base url {} cannot carry a path", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Drive query literal: backslashes and single quotes must be escaped.
fn drive_query_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// A1 range addressing the whole sheet, e.g. `'Node Log'!A1`.
fn sheet_range(title: &str) -> String {
    format!("'{}'!A1", title.replace('\'', "''"))
}

fn select_sheet(sheets: Vec<SheetEntry>, worksheet_name: &str) -> Option<SheetProperties> {
    let mut properties = sheets.into_iter().map(|s| s.properties);
    if worksheet_name.is_empty() {
        properties.min_by_key(|p| p.index)
    } else {
        properties.find(|p| p.title == worksheet_name)
    }
}

impl SpreadsheetClient for GoogleSheetsClient {
    type Document = GoogleDocument;

    async fn open(&self, document_name: &str) -> Result<GoogleDocument, String> {
        let mut url = endpoint(&self.api.drive_base_url, &["files"])?;
        url.query_pairs_mut()
            .append_pair(
                "q",
                &format!(
                    "name = '{}' and mimeType = '{}' and trashed = false",
                    drive_query_literal(document_name),
                    SPREADSHEET_MIME_TYPE
                ),
            )
            .append_pair("fields", "files(id,name)")
            .append_pair("supportsAllDrives", "true")
            .append_pair("includeItemsFromAllDrives", "true");

        let listing: DriveFileList = self.get_json(url, "Spreadsheet lookup").await?;
        let file = listing
            .files
            .into_iter()
            .next()
            .ok_or_else(|| format!("spreadsheet '{}' not found", document_name))?;

        tracing::debug!(id = %file.id, name = %file.name, "Resolved spreadsheet");
        Ok(GoogleDocument {
            client: self.clone(),
            spreadsheet_id: file.id,
        })
    }
}

#[derive(Clone)]
pub struct GoogleDocument {
    client: GoogleSheetsClient,
    spreadsheet_id: String,
}

impl GoogleDocument {
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }
}

impl SpreadsheetDocument for GoogleDocument {
    type Worksheet = GoogleWorksheet;

    async fn worksheet(&self, worksheet_name: &str) -> Result<GoogleWorksheet, String> {
        let mut url = endpoint(
            &self.client.api.sheets_base_url,
            &["spreadsheets", &self.spreadsheet_id],
        )?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties(sheetId,title,index)");

        let metadata: SpreadsheetMetadata =
            self.client.get_json(url, "Worksheet lookup").await?;
        let properties = select_sheet(metadata.sheets, worksheet_name).ok_or_else(|| {
            if worksheet_name.is_empty() {
                "spreadsheet has no worksheets".to_string()
            } else {
                format!("worksheet '{}' not found", worksheet_name)
            }
        })?;

        Ok(GoogleWorksheet {
            client: self.client.clone(),
            spreadsheet_id: self.spreadsheet_id.clone(),
            sheet_id: properties.sheet_id,
            title: properties.title,
        })
    }
}

#[derive(Clone)]
pub struct GoogleWorksheet {
    client: GoogleSheetsClient,
    spreadsheet_id: String,
    sheet_id: i64,
    title: String,
}

impl GoogleWorksheet {
    pub fn sheet_id(&self) -> i64 {
        self.sheet_id
    }
}

impl Worksheet for GoogleWorksheet {
    fn title(&self) -> &str {
        &self.title
    }

    async fn append_row(&self, cells: &[Value]) -> Result<(), String> {
        let range = format!("{}:append", sheet_range(&self.title));
        let mut url = endpoint(
            &self.client.api.sheets_base_url,
            &["spreadsheets", &self.spreadsheet_id, "values", &range],
        )?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let body = json!({
            "majorDimension": "ROWS",
            "values": [cells],
        });
        let response = self
            .client
            .http
            .post(url)
            .bearer_auth(&self.client.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| describe_request_error("Row append", &e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            Err(format!("Row append failed ({}): {}", status, error_text))
        }
    }
}
