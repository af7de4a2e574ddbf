//! Node configuration produced by graph loading.

use serde::{Deserialize, Serialize};

/// Identity and gain set for one workflow node.
///
/// Gains absent from the document keep their defaults: a pure proportional
/// unit controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Node identifier, unique within one document.
    pub id: String,

    /// Proportional gain.
    #[serde(default = "default_kp")]
    pub kp: f64,

    /// Integral gain.
    #[serde(default = "default_ki")]
    pub ki: f64,

    /// Derivative gain.
    #[serde(default = "default_kd")]
    pub kd: f64,
}

fn default_kp() -> f64 {
    1.0
}

fn default_ki() -> f64 {
    0.0
}

fn default_kd() -> f64 {
    0.0
}

impl NodeConfig {
    /// A node with the default gain set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kp: default_kp(),
            ki: default_ki(),
            kd: default_kd(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_has_default_gains() {
        let node = NodeConfig::new("controller");
        assert_eq!(node.id, "controller");
        assert_eq!(node.kp, 1.0);
        assert_eq!(node.ki, 0.0);
        assert_eq!(node.kd, 0.0);
    }

    #[test]
    fn missing_gains_deserialize_to_defaults() {
        let node: NodeConfig = serde_json::from_str(r#"{"id": "plant", "ki": 0.25}"#).unwrap();
        assert_eq!(node, NodeConfig { ki: 0.25, ..NodeConfig::new("plant") });
    }

    #[test]
    fn serialization_round_trips() {
        let node = NodeConfig {
            id: "controller".into(),
            kp: 2.0,
            ki: 0.5,
            kd: 0.1,
        };
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(serde_json::from_str::<NodeConfig>(&json).unwrap(), node);
    }
}
