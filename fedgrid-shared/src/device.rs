use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Record type under which gateway hardware is registered.
pub const GATEWAY_RECORD_TYPE: &str = "gateway_record";
/// Challenge-key type that skips real key material; the device echoes the
/// challenge back instead of signing it.
pub const ECHO_KEY_TYPE: &str = "ECHO";

/// Authentication key descriptor for a registered device.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChallengeKey {
    pub key_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl ChallengeKey {
    pub fn echo() -> Self {
        ChallengeKey {
            key_type: ECHO_KEY_TYPE.to_string(),
            key: None,
        }
    }
}

/// Hardware identity and credential metadata registered for a gateway.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GatewayDevice {
    pub hardware_id: String,
    pub key: ChallengeKey,
}

impl GatewayDevice {
    /// A device record with an echo challenge key, the shape used by test
    /// fixtures.
    pub fn echo(hardware_id: impl Into<String>) -> Self {
        GatewayDevice {
            hardware_id: hardware_id.into(),
            key: ChallengeKey::echo(),
        }
    }
}

impl Display for GatewayDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string_pretty(self).unwrap();
        write!(f, "{}", json)
    }
}
