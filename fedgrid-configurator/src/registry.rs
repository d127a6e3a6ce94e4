//! In-memory gateway device registry.
//!
//! Independent of the configuration store: records are keyed by
//! (network, record type, hardware id) and the registry does not check that
//! the network exists anywhere else.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use fedgrid_shared::serdes::{ConfigRegistry, SerdesError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ConfiguratorError, ConfiguratorResult};

/// A registered device as stored: the validated payload plus registration
/// metadata.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeviceRecord {
    pub device_type: String,
    pub hardware_id: String,
    pub payload: Value,
    /// RFC 3339 timestamp of the (latest) registration.
    pub registered_at: String,
}

#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: DashMap<(String, String, String), DeviceRecord>,
}

impl DeviceRegistry {
    /// Start an embedded registry instance for a test run.
    pub fn start() -> Arc<Self> {
        tracing::info!("starting embedded device registry");
        Arc::new(DeviceRegistry::default())
    }

    /// Register a device record for a network. The record is validated
    /// against the serialization rules under its record type; an existing
    /// registration for the same hardware id is replaced.
    pub async fn register_device<T: Serialize>(
        &self,
        network_id: &str,
        device_type: &str,
        hardware_id: &str,
        record: &T,
        serdes: &ConfigRegistry,
    ) -> ConfiguratorResult<()> {
        let payload = serde_json::to_value(record).map_err(|source| SerdesError::Encode {
            tag: device_type.to_string(),
            source,
        })?;
        serdes.validate(device_type, &payload)?;

        self.devices.insert(
            (
                network_id.to_string(),
                device_type.to_string(),
                hardware_id.to_string(),
            ),
            DeviceRecord {
                device_type: device_type.to_string(),
                hardware_id: hardware_id.to_string(),
                payload,
                registered_at: Utc::now().to_rfc3339(),
            },
        );
        tracing::info!(network_id, device_type, hardware_id, "registered device");
        Ok(())
    }

    pub async fn get_device(
        &self,
        network_id: &str,
        device_type: &str,
        hardware_id: &str,
    ) -> ConfiguratorResult<DeviceRecord> {
        self.devices
            .get(&(
                network_id.to_string(),
                device_type.to_string(),
                hardware_id.to_string(),
            ))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ConfiguratorError::DeviceNotFound {
                network_id: network_id.to_string(),
                device_type: device_type.to_string(),
                hardware_id: hardware_id.to_string(),
            })
    }

    /// Fetch a device record decoded back into its typed form.
    pub async fn typed_device<T: DeserializeOwned>(
        &self,
        network_id: &str,
        device_type: &str,
        hardware_id: &str,
    ) -> ConfiguratorResult<T> {
        let record = self.get_device(network_id, device_type, hardware_id).await?;
        serde_json::from_value(record.payload).map_err(|source| {
            ConfiguratorError::Serdes(SerdesError::Decode {
                tag: device_type.to_string(),
                source,
            })
        })
    }

    pub async fn remove_device(
        &self,
        network_id: &str,
        device_type: &str,
        hardware_id: &str,
    ) -> ConfiguratorResult<()> {
        self.devices
            .remove(&(
                network_id.to_string(),
                device_type.to_string(),
                hardware_id.to_string(),
            ))
            .map(|_| ())
            .ok_or_else(|| ConfiguratorError::DeviceNotFound {
                network_id: network_id.to_string(),
                device_type: device_type.to_string(),
                hardware_id: hardware_id.to_string(),
            })
    }

    /// Drop every registration.
    pub async fn reset(&self) {
        let count = self.devices.len();
        self.devices.clear();
        tracing::info!(devices = count, "cleared device registry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fedgrid_shared::device::{GATEWAY_RECORD_TYPE, GatewayDevice};

    #[tokio::test]
    async fn register_and_fetch_typed() {
        let registry = DeviceRegistry::start();
        let serdes = ConfigRegistry::device();
        let device = GatewayDevice::echo("gw_hw");

        registry
            .register_device("n1", GATEWAY_RECORD_TYPE, "gw_hw", &device, &serdes)
            .await
            .unwrap();

        let fetched: GatewayDevice = registry
            .typed_device("n1", GATEWAY_RECORD_TYPE, "gw_hw")
            .await
            .unwrap();
        assert_eq!(fetched, device);

        let record = registry
            .get_device("n1", GATEWAY_RECORD_TYPE, "gw_hw")
            .await
            .unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&record.registered_at).is_ok());
    }

    #[tokio::test]
    async fn unknown_record_type_is_rejected() {
        let registry = DeviceRegistry::start();
        let err = registry
            .register_device(
                "n1",
                "bogus_record",
                "gw_hw",
                &GatewayDevice::echo("gw_hw"),
                &ConfigRegistry::device(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ConfiguratorError::Serdes(_)));
    }

    #[tokio::test]
    async fn missing_device_errors() {
        let registry = DeviceRegistry::start();
        let err = registry
            .get_device("n1", GATEWAY_RECORD_TYPE, "missing")
            .await
            .unwrap_err();
        assert!(matches!(err, ConfiguratorError::DeviceNotFound { .. }));
    }

    #[tokio::test]
    async fn remove_and_reset() {
        let registry = DeviceRegistry::start();
        let serdes = ConfigRegistry::device();
        registry
            .register_device(
                "n1",
                GATEWAY_RECORD_TYPE,
                "gw_hw",
                &GatewayDevice::echo("gw_hw"),
                &serdes,
            )
            .await
            .unwrap();

        registry
            .remove_device("n1", GATEWAY_RECORD_TYPE, "gw_hw")
            .await
            .unwrap();
        assert!(
            registry
                .get_device("n1", GATEWAY_RECORD_TYPE, "gw_hw")
                .await
                .is_err()
        );

        registry
            .register_device(
                "n1",
                GATEWAY_RECORD_TYPE,
                "gw_hw",
                &GatewayDevice::echo("gw_hw"),
                &serdes,
            )
            .await
            .unwrap();
        registry.reset().await;
        assert!(
            registry
                .get_device("n1", GATEWAY_RECORD_TYPE, "gw_hw")
                .await
                .is_err()
        );
    }
}
