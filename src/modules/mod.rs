pub mod auth;
pub mod metrics;
pub mod sheets;
pub mod system;
