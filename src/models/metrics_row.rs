use serde_json::Value;

use crate::constants::RESILIENCE_WARNING;

/// Smallest number of offline nodes that endangers the network:
/// `round(total / 3 + 1)`.
///
/// `total / 3` never has a fractional part of one half, so the rounding mode
/// is irrelevant and the value is computed exactly as `(total + 1) / 3 + 1`.
/// At `u64::MAX` the saturated sum is still divisible by three, so the
/// result stays exact.
pub fn resilience_threshold(total_nodes: u64) -> u64 {
    total_nodes.saturating_add(1) / 3 + 1
}

pub fn resilience_warning(offline_nodes: u64, threshold: u64) -> &'static str {
    if offline_nodes >= threshold {
        RESILIENCE_WARNING
    } else {
        ""
    }
}

/// One summary line of the metrics worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsRow {
    timestamp: String,
    network_name: String,
    total_nodes: u64,
    offline_nodes: u64,
    resilience_threshold: u64,
    warning_message: String,
}

impl MetricsRow {
    /// Builds a row from node counts taken over the same results, so
    /// `offline_nodes <= total_nodes`.
    pub(crate) fn from_counts(
        timestamp: impl Into<String>,
        network_name: impl Into<String>,
        total_nodes: u64,
        offline_nodes: u64,
    ) -> Self {
        debug_assert!(
            offline_nodes <= total_nodes,
            "offline count {} exceeds total {}",
            offline_nodes,
            total_nodes
        );
        let threshold = resilience_threshold(total_nodes);
        Self {
            timestamp: timestamp.into(),
            network_name: network_name.into(),
            total_nodes,
            offline_nodes,
            resilience_threshold: threshold,
            warning_message: resilience_warning(offline_nodes, threshold).to_string(),
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn network_name(&self) -> &str {
        &self.network_name
    }

    pub fn total_nodes(&self) -> u64 {
        self.total_nodes
    }

    pub fn offline_nodes(&self) -> u64 {
        self.offline_nodes
    }

    pub fn resilience_threshold(&self) -> u64 {
        self.resilience_threshold
    }

    pub fn warning_message(&self) -> &str {
        &self.warning_message
    }

    pub fn is_endangered(&self) -> bool {
        !self.warning_message.is_empty()
    }

    /// The six worksheet cells, in column order.
    pub fn cells(&self) -> Vec<Value> {
        vec![
            Value::from(self.timestamp.as_str()),
            Value::from(self.network_name.as_str()),
            Value::from(self.total_nodes),
            Value::from(self.offline_nodes),
            Value::from(self.resilience_threshold),
            Value::from(self.warning_message.as_str()),
        ]
    }
}
