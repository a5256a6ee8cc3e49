use std::sync::LazyLock;

pub const SHEETS_SCOPES: [&str; 4] = [
    "https://spreadsheets.google.com/feeds",
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive.file",
    "https://www.googleapis.com/auth/drive",
];

pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";

pub const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

pub const RESILIENCE_WARNING: &str = "Network Resilience Danger!";

/// `MM/DD/YY HH:MM:SS`, independent of the process locale.
pub const ROW_TIMESTAMP_FORMAT: &str = "%m/%d/%y %H:%M:%S";

pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    format!(
        "validator-sheets/{} {}/{}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
});

pub fn scope_string() -> String {
    SHEETS_SCOPES.join(" ")
}
