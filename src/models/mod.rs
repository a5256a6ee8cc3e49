pub mod config;
pub mod metrics_row;
pub mod node_status;

pub use config::{ApiEndpointsConfig, AppConfig};
pub use metrics_row::MetricsRow;
pub use node_status::{NodeHealth, NodeStatus};
