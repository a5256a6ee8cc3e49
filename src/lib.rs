pub mod constants;
pub mod error;
pub mod models;
pub mod modules;
mod utils;

#[cfg(test)]
mod test_utils;

use std::path::Path;

use error::{AppError, AppResult};
use models::{MetricsRow, NodeStatus};
use modules::auth::GoogleAuthenticator;
use modules::metrics::{MetricsReporter, SheetLocation};
use modules::system::{config, logger, validation};
use tokio::io::AsyncReadExt;
use tracing::{error, info};

pub use modules::metrics::{Clock, FixedClock, SystemClock};
pub use modules::sheets::{Authenticator, SpreadsheetClient, SpreadsheetDocument, Worksheet};

/// Reads the validator results from `path`, or from stdin when absent.
async fn read_results(path: Option<&Path>) -> AppResult<Vec<NodeStatus>> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Input(format!("failed_to_read_results {:?}: {}", path, e)))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .map_err(|e| AppError::Input(format!("failed_to_read_results_stdin: {}", e)))?;
            raw
        }
    };
    models::node_status::parse_results(&raw).map_err(AppError::Input)
}

fn load_config() -> AppResult<models::AppConfig> {
    let mut config = config::load_app_config().map_err(AppError::Config)?;
    config::apply_env_overrides(&mut config);
    validation::validate_app_config(&config)
        .map_err(|errors| AppError::Config(validation::format_errors(&errors)))?;
    Ok(config)
}

async fn run_report(results_path: Option<&Path>) -> AppResult<MetricsRow> {
    let config = load_config()?;
    let results = read_results(results_path).await?;
    info!(
        "Reporting {} validator records for {}",
        results.len(),
        config.network_name
    );

    let reporter = MetricsReporter::new(GoogleAuthenticator::from_config(&config)?);
    reporter
        .report(
            &results,
            &config.network_name,
            &SheetLocation::from_config(&config),
        )
        .await
}

/// Process entry point: one report per invocation, non-zero exit on failure.
pub fn run() {
    let log_guard = logger::init_logger();
    info!(
        "validator-sheets {} starting (tls: {})",
        env!("CARGO_PKG_VERSION"),
        utils::http::tls_backend_name()
    );

    let results_path = std::env::args().nth(1).map(std::path::PathBuf::from);

    let exit_code = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => match runtime.block_on(run_report(results_path.as_deref())) {
            Ok(_) => 0,
            Err(e) => {
                match &e {
                    AppError::Authorization { .. } => {
                        logger::log_error("Unable to authorize credentials, exiting")
                    }
                    AppError::SheetAccess { .. } => {
                        logger::log_error("Unable to write metrics row, exiting")
                    }
                    _ => {}
                }
                error!("{}", e);
                1
            }
        },
        Err(e) => {
            error!("Failed to create Tokio runtime: {}", e);
            1
        }
    };

    drop(log_guard);
    std::process::exit(exit_code);
}
