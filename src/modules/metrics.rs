//! Network resilience metrics: count the validator pool, decide whether it
//! is endangered, and append the summary row to the metrics worksheet.

use chrono::NaiveDateTime;

use crate::constants::ROW_TIMESTAMP_FORMAT;
use crate::error::{AppError, AppResult};
use crate::models::{AppConfig, MetricsRow, NodeStatus};
use crate::modules::sheets::{Authenticator, SpreadsheetClient, SpreadsheetDocument, Worksheet};
use crate::modules::system::logger;

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Where the row goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLocation {
    pub credentials_id: String,
    pub document_name: String,
    /// Empty selects the first worksheet.
    pub worksheet_name: String,
}

impl SheetLocation {
    pub fn new(
        credentials_id: impl Into<String>,
        document_name: impl Into<String>,
        worksheet_name: impl Into<String>,
    ) -> Self {
        Self {
            credentials_id: credentials_id.into(),
            document_name: document_name.into(),
            worksheet_name: worksheet_name.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.credentials_id.clone(),
            config.document_name.clone(),
            config.worksheet_name.clone(),
        )
    }

    fn worksheet_label(&self) -> &str {
        if self.worksheet_name.is_empty() {
            "<first worksheet>"
        } else {
            &self.worksheet_name
        }
    }

    fn access_error(&self, reason: String) -> AppError {
        AppError::sheet_access(&self.document_name, self.worksheet_label(), reason)
    }
}

/// Returns `(total, offline)` in a single pass over the results.
pub fn count_nodes(results: &[NodeStatus]) -> (u64, u64) {
    results.iter().fold((0, 0), |(total, offline), node| {
        tracing::debug!(node = node.display_name(), ok = node.status.ok, "Validator status");
        (total + 1, offline + u64::from(node.is_offline()))
    })
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(ROW_TIMESTAMP_FORMAT).to_string()
}

pub struct MetricsReporter<A, C = SystemClock> {
    authenticator: A,
    clock: C,
}

impl<A: Authenticator> MetricsReporter<A, SystemClock> {
    pub fn new(authenticator: A) -> Self {
        Self::with_clock(authenticator, SystemClock)
    }
}

impl<A: Authenticator, C: Clock> MetricsReporter<A, C> {
    pub fn with_clock(authenticator: A, clock: C) -> Self {
        Self {
            authenticator,
            clock,
        }
    }

    pub fn build_row(&self, results: &[NodeStatus], network_name: &str) -> MetricsRow {
        let (total, offline) = count_nodes(results);
        MetricsRow::from_counts(
            format_timestamp(self.clock.now()),
            network_name,
            total,
            offline,
        )
    }

    /// Computes the summary row and appends it to the worksheet at
    /// `location`. Nothing is written unless authorization and worksheet
    /// resolution both succeed.
    pub async fn report(
        &self,
        results: &[NodeStatus],
        network_name: &str,
        location: &SheetLocation,
    ) -> AppResult<MetricsRow> {
        let row = self.build_row(results, network_name);
        tracing::info!(row = ?row.cells(), "Assembled metrics row");
        if row.is_endangered() {
            logger::log_warn(&format!(
                "{}: {} of {} nodes offline (threshold {})",
                row.warning_message(),
                row.offline_nodes(),
                row.total_nodes(),
                row.resilience_threshold()
            ));
        }

        let client = self
            .authenticator
            .authorize(&location.credentials_id)
            .await?;
        let document = client
            .open(&location.document_name)
            .await
            .map_err(|e| location.access_error(e))?;
        let worksheet = document
            .worksheet(&location.worksheet_name)
            .await
            .map_err(|e| location.access_error(e))?;
        worksheet
            .append_row(&row.cells())
            .await
            .map_err(|e| location.access_error(e))?;

        logger::log_info(&format!(
            "Done! Appended metrics for {} to '{}' / '{}'",
            network_name,
            location.document_name,
            worksheet.title()
        ));
        Ok(row)
    }
}
