//! Serialization rules passed alongside every create/load call.
//!
//! A registry maps config-type tags to decode checks so the store can reject
//! payloads it has no rule for, without owning the payload types itself.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::device::{GATEWAY_RECORD_TYPE, GatewayDevice};
use crate::entity::{MANAGED_GATEWAY_ENTITY_TYPE, RADIO_GATEWAY_ENTITY_TYPE};
use crate::federation::{
    DnsConfig, FeaturesConfig, FederatedCoreConfig, FederationConfig, RadioNetworkConfig,
};
use crate::gateway::{ManagedGatewayConfig, RadioGatewayConfig};
use crate::network::{
    DNS_CONFIG_TYPE, FEATURES_CONFIG_TYPE, FEDERATED_CORE_CONFIG_TYPE, FEDERATION_CONFIG_TYPE,
    RADIO_CONFIG_TYPE,
};

#[derive(Debug, Error)]
pub enum SerdesError {
    #[error("no serialization rule registered for config type '{0}'")]
    UnregisteredType(String),

    #[error("payload for config type '{tag}' failed to decode: {source}")]
    Decode {
        tag: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("record for type '{tag}' failed to encode: {source}")]
    Encode {
        tag: String,
        #[source]
        source: serde_json::Error,
    },
}

type CheckFn = fn(&Value) -> Result<(), serde_json::Error>;

fn decode_check<T: DeserializeOwned>(value: &Value) -> Result<(), serde_json::Error> {
    serde_json::from_value::<T>(value.clone()).map(|_| ())
}

/// Maps config-type tags to the payload types they must decode as.
#[derive(Debug, Clone, Default)]
pub struct ConfigRegistry {
    rules: BTreeMap<String, CheckFn>,
}

impl ConfigRegistry {
    pub fn new() -> Self {
        ConfigRegistry::default()
    }

    pub fn register<T: DeserializeOwned>(mut self, tag: &str) -> Self {
        self.rules.insert(tag.to_string(), decode_check::<T>);
        self
    }

    pub fn validate(&self, tag: &str, value: &Value) -> Result<(), SerdesError> {
        let check = self
            .rules
            .get(tag)
            .ok_or_else(|| SerdesError::UnregisteredType(tag.to_string()))?;
        check(value).map_err(|source| SerdesError::Decode {
            tag: tag.to_string(),
            source,
        })
    }

    /// Rules for network-level config payloads.
    pub fn network() -> Self {
        ConfigRegistry::new()
            .register::<FeaturesConfig>(FEATURES_CONFIG_TYPE)
            .register::<DnsConfig>(DNS_CONFIG_TYPE)
            .register::<FederationConfig>(FEDERATION_CONFIG_TYPE)
            .register::<FederatedCoreConfig>(FEDERATED_CORE_CONFIG_TYPE)
            .register::<RadioNetworkConfig>(RADIO_CONFIG_TYPE)
    }

    /// Rules for entity config payloads, keyed by entity type.
    pub fn entity() -> Self {
        ConfigRegistry::new()
            .register::<RadioGatewayConfig>(RADIO_GATEWAY_ENTITY_TYPE)
            .register::<ManagedGatewayConfig>(MANAGED_GATEWAY_ENTITY_TYPE)
    }

    /// Rules for device records, keyed by record type.
    pub fn device() -> Self {
        ConfigRegistry::new().register::<GatewayDevice>(GATEWAY_RECORD_TYPE)
    }
}
