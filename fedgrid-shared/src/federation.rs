use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Federation config carried by neutral-host and serving-hub networks.
///
/// `nh_routes` maps a subscriber route prefix to the serving network that
/// handles it; `served_network_ids` and `served_nh_ids` describe which side
/// of the federation this network serves.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FederationConfig {
    #[serde(default)]
    pub nh_routes: BTreeMap<String, String>,
    #[serde(default)]
    pub served_network_ids: Vec<String>,
    #[serde(default)]
    pub served_nh_ids: Vec<String>,
    pub relay_enabled: bool,
    pub proxy_address: String,
}

impl Default for FederationConfig {
    fn default() -> Self {
        FederationConfig {
            nh_routes: BTreeMap::new(),
            served_network_ids: Vec::new(),
            served_nh_ids: Vec::new(),
            relay_enabled: false,
            proxy_address: "127.0.0.1:9098".to_string(),
        }
    }
}

/// Points a federated RAN network at the federation network serving it.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FederatedCoreConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub federation_network_id: Option<String>,
}

/// Free-form feature flags attached to every network.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FeaturesConfig {
    #[serde(default)]
    pub features: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DnsConfig {
    pub enable_caching: bool,
    pub local_ttl: u32,
    pub dhcp_server_enabled: bool,
}

impl Default for DnsConfig {
    fn default() -> Self {
        DnsConfig {
            enable_caching: false,
            local_ttl: 0,
            dhcp_server_enabled: true,
        }
    }
}

/// Radio parameters for a federated RAN network. Defaults describe the
/// standard TDD profile.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RadioNetworkConfig {
    pub band_mode: String,
    pub earfcn_downlink: u32,
    pub subframe_assignment: u8,
    pub special_subframe_pattern: u8,
    pub bandwidth_mhz: u8,
}

impl Default for RadioNetworkConfig {
    fn default() -> Self {
        RadioNetworkConfig {
            band_mode: "tdd".to_string(),
            earfcn_downlink: 44590,
            subframe_assignment: 2,
            special_subframe_pattern: 7,
            bandwidth_mhz: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn federation_default_has_no_routes() {
        let config = FederationConfig::default();
        assert!(config.nh_routes.is_empty());
        assert!(config.served_network_ids.is_empty());
        assert!(config.served_nh_ids.is_empty());
        assert!(!config.relay_enabled);
    }

    #[test]
    fn radio_default_is_tdd_profile() {
        let config = RadioNetworkConfig::default();
        assert_eq!(config.band_mode, "tdd");
        assert_eq!(config.earfcn_downlink, 44590);
        assert_eq!(config.subframe_assignment, 2);
        assert_eq!(config.special_subframe_pattern, 7);
    }
}
