use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Network type for federation networks (neutral host and serving hub).
pub const FEDERATION_NETWORK_TYPE: &str = "federation";
/// Network type for radio access networks federated through a neutral host.
pub const FEDERATED_RAN_NETWORK_TYPE: &str = "federated_ran";

// Config-type tags understood by the configuration store. Each tag maps to
// one payload type in the serialization-rules registry.
pub const FEATURES_CONFIG_TYPE: &str = "features";
pub const DNS_CONFIG_TYPE: &str = "dns";
pub const FEDERATION_CONFIG_TYPE: &str = "federation";
pub const FEDERATED_CORE_CONFIG_TYPE: &str = "federated_core";
pub const RADIO_CONFIG_TYPE: &str = "radio";

/// A logical network definition: identity, display metadata and a mapping of
/// config-type tag to configuration payload.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Network {
    pub id: String,
    pub network_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub configs: BTreeMap<String, Value>,
}

impl Network {
    pub fn new(id: impl Into<String>, network_type: impl Into<String>) -> Self {
        Network {
            id: id.into(),
            network_type: network_type.into(),
            ..Network::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach a typed config payload under the given config-type tag.
    pub fn with_config<T: Serialize>(
        mut self,
        tag: &str,
        config: &T,
    ) -> Result<Self, serde_json::Error> {
        self.configs.insert(tag.to_string(), serde_json::to_value(config)?);
        Ok(self)
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string_pretty(self).unwrap();
        write!(f, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::federation::FeaturesConfig;

    #[test]
    fn with_config_keys_by_tag() {
        let network = Network::new("nh", FEDERATION_NETWORK_TYPE)
            .name("TestNeutralHost")
            .with_config(FEATURES_CONFIG_TYPE, &FeaturesConfig::default())
            .unwrap();

        assert_eq!(network.configs.len(), 1);
        assert!(network.configs.contains_key(FEATURES_CONFIG_TYPE));
        assert_eq!(network.name, "TestNeutralHost");
    }

    #[test]
    fn serde_round_trip_is_structural() {
        let network = Network::new("nh", FEDERATION_NETWORK_TYPE)
            .description("Test Neutral Host")
            .with_config(FEATURES_CONFIG_TYPE, &FeaturesConfig::default())
            .unwrap();

        let json = serde_json::to_string(&network).unwrap();
        let back: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(network, back);
    }
}
