use serde::{Deserialize, Serialize};

/// One validator record as reported by the status poller. Only the health
/// flag is needed here; everything else in the record is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatus {
    #[serde(default)]
    pub name: Option<String>,
    pub status: NodeHealth,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeHealth {
    pub ok: bool,
}

impl NodeStatus {
    pub fn new(name: impl Into<String>, ok: bool) -> Self {
        Self {
            name: Some(name.into()),
            status: NodeHealth { ok },
        }
    }

    pub fn is_offline(&self) -> bool {
        !self.status.ok
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

pub fn parse_results(raw: &str) -> Result<Vec<NodeStatus>, String> {
    serde_json::from_str(raw).map_err(|e| format!("failed_to_parse_validator_results: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_poller_output_ignoring_extra_fields() {
        let raw = r#"[
            {"name": "Node1", "client-address": "tcp://1.2.3.4:9702",
             "status": {"ok": true, "timestamp": "1606000000", "errors": 0}},
            {"name": "Node2", "status": {"ok": false, "errors": 3}, "errors": ["unreachable"]}
        ]"#;
        let nodes = parse_results(raw).expect("parse results");
        assert_eq!(nodes.len(), 2);
        assert!(!nodes[0].is_offline());
        assert!(nodes[1].is_offline());
        assert_eq!(nodes[1].display_name(), "Node2");
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_results("[]").expect("parse").is_empty());
    }

    #[test]
    fn record_without_health_flag_is_rejected() {
        let err = parse_results(r#"[{"name": "Node1", "status": {}}]"#).unwrap_err();
        assert!(err.starts_with("failed_to_parse_validator_results"));
    }

    #[test]
    fn unnamed_record_has_placeholder_name() {
        let nodes = parse_results(r#"[{"status": {"ok": true}}]"#).expect("parse");
        assert_eq!(nodes[0].display_name(), "<unnamed>");
    }
}
