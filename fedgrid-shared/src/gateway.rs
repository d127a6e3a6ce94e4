use serde::{Deserialize, Serialize};

/// Packet-core side parameters of a radio gateway.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CoreGatewayParams {
    pub nat_enabled: bool,
    pub ip_block: String,
}

impl Default for CoreGatewayParams {
    fn default() -> Self {
        CoreGatewayParams {
            nat_enabled: true,
            ip_block: "192.168.128.0/24".to_string(),
        }
    }
}

/// Radio side parameters of a radio gateway.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RadioGatewayParams {
    pub pci: u32,
    pub transmit_enabled: bool,
}

impl Default for RadioGatewayParams {
    fn default() -> Self {
        RadioGatewayParams {
            pci: 260,
            transmit_enabled: true,
        }
    }
}

/// Config payload for `radio_gateway` entities.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RadioGatewayConfig {
    pub core: CoreGatewayParams,
    pub radio: RadioGatewayParams,
}

/// Config payload for `managed_gateway` entities: checkin cadence and the
/// autoupgrade policy applied by the upgrade tier.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ManagedGatewayConfig {
    pub autoupgrade_enabled: bool,
    pub autoupgrade_poll_interval: u32,
    pub checkin_interval: u32,
    pub checkin_timeout: u32,
}

impl Default for ManagedGatewayConfig {
    fn default() -> Self {
        ManagedGatewayConfig {
            autoupgrade_enabled: true,
            autoupgrade_poll_interval: 300,
            checkin_interval: 15,
            checkin_timeout: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn managed_gateway_defaults() {
        let config = ManagedGatewayConfig::default();
        assert!(config.autoupgrade_enabled);
        assert_eq!(config.autoupgrade_poll_interval, 300);
        assert_eq!(config.checkin_interval, 15);
        assert_eq!(config.checkin_timeout, 5);
    }
}
