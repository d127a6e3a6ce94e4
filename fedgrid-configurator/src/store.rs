//! In-memory configuration-entity store.
//!
//! Create calls validate every config payload against the caller-supplied
//! serialization rules before any state changes, so a failed batch leaves the
//! store untouched. Create semantics are upsert: re-creating a network
//! replaces it wholesale, re-creating an entity replaces that entity.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use dashmap::DashMap;
use fedgrid_shared::entity::{EntityKey, NetworkEntity};
use fedgrid_shared::network::Network;
use fedgrid_shared::serdes::ConfigRegistry;

use crate::error::{ConfiguratorError, ConfiguratorResult};

/// Gates which parts of a network definition a load hydrates.
#[derive(Debug, Clone, Copy)]
pub struct NetworkLoadCriteria {
    pub load_metadata: bool,
    pub load_configs: bool,
}

impl NetworkLoadCriteria {
    /// Full hydration: metadata and configs included.
    pub fn full() -> Self {
        NetworkLoadCriteria {
            load_metadata: true,
            load_configs: true,
        }
    }
}

/// Gates which parts of an entity a load hydrates.
#[derive(Debug, Clone, Copy)]
pub struct EntityLoadCriteria {
    pub load_config: bool,
    pub load_associations: bool,
}

impl EntityLoadCriteria {
    pub fn full() -> Self {
        EntityLoadCriteria {
            load_config: true,
            load_associations: true,
        }
    }
}

#[derive(Debug, Clone)]
struct NetworkRecord {
    network: Network,
    entities: BTreeMap<EntityKey, NetworkEntity>,
}

#[derive(Debug, Default)]
pub struct ConfiguratorStore {
    networks: DashMap<String, NetworkRecord>,
}

impl ConfiguratorStore {
    /// Start an embedded store instance, the in-process analog of booting
    /// the configuration service for a test run.
    pub fn start() -> Arc<Self> {
        tracing::info!("starting embedded configuration store");
        Arc::new(ConfiguratorStore::default())
    }

    /// Batch-create network definitions. Payloads are validated against the
    /// serialization rules up front; an existing network with the same id is
    /// replaced along with its entities. Returns the ids in input order.
    pub async fn create_networks(
        &self,
        networks: Vec<Network>,
        serdes: &ConfigRegistry,
    ) -> ConfiguratorResult<Vec<String>> {
        for network in &networks {
            for (tag, value) in &network.configs {
                serdes.validate(tag, value)?;
            }
        }

        let mut ids = Vec::with_capacity(networks.len());
        for network in networks {
            let id = network.id.clone();
            if self.networks.contains_key(&id) {
                tracing::warn!(network_id = %id, "replacing existing network");
            }
            self.networks.insert(
                id.clone(),
                NetworkRecord {
                    network,
                    entities: BTreeMap::new(),
                },
            );
            ids.push(id);
        }
        tracing::info!(count = ids.len(), "created networks");
        Ok(ids)
    }

    /// Batch-create entities scoped to one network. Every association must
    /// resolve to an entity already in the network or declared anywhere in
    /// the same batch; entity configs are validated under their entity type.
    pub async fn create_entities(
        &self,
        network_id: &str,
        entities: Vec<NetworkEntity>,
        serdes: &ConfigRegistry,
    ) -> ConfiguratorResult<Vec<EntityKey>> {
        let mut record = self
            .networks
            .get_mut(network_id)
            .ok_or_else(|| ConfiguratorError::NetworkNotFound(network_id.to_string()))?;

        let mut visible: BTreeSet<EntityKey> = record.entities.keys().cloned().collect();
        visible.extend(entities.iter().map(|entity| entity.id.clone()));

        for entity in &entities {
            if let Some(config) = &entity.config {
                serdes.validate(&entity.id.entity_type, config)?;
            }
            for target in &entity.associations {
                if !visible.contains(target) {
                    return Err(ConfiguratorError::UnknownAssociation {
                        network_id: network_id.to_string(),
                        from: entity.id.clone(),
                        to: target.clone(),
                    });
                }
            }
        }

        let mut keys = Vec::with_capacity(entities.len());
        for entity in entities {
            keys.push(entity.id.clone());
            record.entities.insert(entity.id.clone(), entity);
        }
        tracing::info!(network_id, count = keys.len(), "created entities");
        Ok(keys)
    }

    /// Load one network definition, hydrated per the criteria. Loaded
    /// configs are re-validated against the serialization rules.
    pub async fn load_network(
        &self,
        network_id: &str,
        criteria: NetworkLoadCriteria,
        serdes: &ConfigRegistry,
    ) -> ConfiguratorResult<Network> {
        let record = self
            .networks
            .get(network_id)
            .ok_or_else(|| ConfiguratorError::NetworkNotFound(network_id.to_string()))?;

        let mut network = record.network.clone();
        if criteria.load_configs {
            for (tag, value) in &network.configs {
                serdes.validate(tag, value)?;
            }
        } else {
            network.configs.clear();
        }
        if !criteria.load_metadata {
            network.name.clear();
            network.description.clear();
        }
        Ok(network)
    }

    /// Load all entities of a network in key order, hydrated per the
    /// criteria.
    pub async fn load_entities(
        &self,
        network_id: &str,
        criteria: EntityLoadCriteria,
    ) -> ConfiguratorResult<Vec<NetworkEntity>> {
        let record = self
            .networks
            .get(network_id)
            .ok_or_else(|| ConfiguratorError::NetworkNotFound(network_id.to_string()))?;

        Ok(record
            .entities
            .values()
            .cloned()
            .map(|entity| strip_entity(entity, criteria))
            .collect())
    }

    /// Load one entity by key.
    pub async fn load_entity(
        &self,
        network_id: &str,
        key: &EntityKey,
        criteria: EntityLoadCriteria,
    ) -> ConfiguratorResult<NetworkEntity> {
        let record = self
            .networks
            .get(network_id)
            .ok_or_else(|| ConfiguratorError::NetworkNotFound(network_id.to_string()))?;

        let entity = record
            .entities
            .get(key)
            .cloned()
            .ok_or_else(|| ConfiguratorError::EntityNotFound {
                network_id: network_id.to_string(),
                key: key.clone(),
            })?;
        Ok(strip_entity(entity, criteria))
    }

    pub async fn list_network_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.networks.iter().map(|entry| entry.key().clone()).collect();
        ids.sort();
        ids
    }

    /// Remove a network and all of its entities.
    pub async fn delete_network(&self, network_id: &str) -> ConfiguratorResult<()> {
        self.networks
            .remove(network_id)
            .map(|_| ())
            .ok_or_else(|| ConfiguratorError::NetworkNotFound(network_id.to_string()))
    }

    /// Drop every network. Explicit teardown for suites that reuse a shared
    /// store across runs.
    pub async fn reset(&self) {
        let count = self.networks.len();
        self.networks.clear();
        tracing::info!(networks = count, "cleared configuration store");
    }
}

fn strip_entity(mut entity: NetworkEntity, criteria: EntityLoadCriteria) -> NetworkEntity {
    if !criteria.load_config {
        entity.config = None;
    }
    if !criteria.load_associations {
        entity.associations.clear();
    }
    entity
}

#[cfg(test)]
mod tests {
    use super::*;
    use fedgrid_shared::entity::{RADIO_GATEWAY_ENTITY_TYPE, RADIO_NODE_ENTITY_TYPE};
    use fedgrid_shared::federation::FeaturesConfig;
    use fedgrid_shared::gateway::RadioGatewayConfig;
    use fedgrid_shared::network::{FEATURES_CONFIG_TYPE, FEDERATION_NETWORK_TYPE};

    fn test_network(id: &str) -> Network {
        Network::new(id, FEDERATION_NETWORK_TYPE)
            .name("test network")
            .description("store unit test network")
            .with_config(FEATURES_CONFIG_TYPE, &FeaturesConfig::default())
            .unwrap()
    }

    #[tokio::test]
    async fn create_and_load_full() {
        let store = ConfiguratorStore::start();
        let serdes = ConfigRegistry::network();
        let network = test_network("n1");

        let ids = store
            .create_networks(vec![network.clone()], &serdes)
            .await
            .unwrap();
        assert_eq!(ids, vec!["n1".to_string()]);

        let loaded = store
            .load_network("n1", NetworkLoadCriteria::full(), &serdes)
            .await
            .unwrap();
        assert_eq!(loaded, network);
    }

    #[tokio::test]
    async fn load_criteria_gate_hydration() {
        let store = ConfiguratorStore::start();
        let serdes = ConfigRegistry::network();
        store
            .create_networks(vec![test_network("n1")], &serdes)
            .await
            .unwrap();

        let bare = store
            .load_network(
                "n1",
                NetworkLoadCriteria {
                    load_metadata: false,
                    load_configs: false,
                },
                &serdes,
            )
            .await
            .unwrap();
        assert!(bare.name.is_empty());
        assert!(bare.description.is_empty());
        assert!(bare.configs.is_empty());
        assert_eq!(bare.id, "n1");
        assert_eq!(bare.network_type, FEDERATION_NETWORK_TYPE);
    }

    #[tokio::test]
    async fn recreating_a_network_replaces_it() {
        let store = ConfiguratorStore::start();
        let serdes = ConfigRegistry::network();
        store
            .create_networks(vec![test_network("n1")], &serdes)
            .await
            .unwrap();
        store
            .create_entities(
                "n1",
                vec![NetworkEntity::new(RADIO_NODE_ENTITY_TYPE, "rn1")],
                &ConfigRegistry::entity(),
            )
            .await
            .unwrap();

        let replacement = Network::new("n1", FEDERATION_NETWORK_TYPE).name("replaced");
        store
            .create_networks(vec![replacement.clone()], &serdes)
            .await
            .unwrap();

        let loaded = store
            .load_network("n1", NetworkLoadCriteria::full(), &serdes)
            .await
            .unwrap();
        assert_eq!(loaded, replacement);
        let entities = store
            .load_entities("n1", EntityLoadCriteria::full())
            .await
            .unwrap();
        assert!(entities.is_empty());
    }

    #[tokio::test]
    async fn entity_create_requires_existing_network() {
        let store = ConfiguratorStore::start();
        let err = store
            .create_entities(
                "missing",
                vec![NetworkEntity::new(RADIO_NODE_ENTITY_TYPE, "rn1")],
                &ConfigRegistry::entity(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ConfiguratorError::NetworkNotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn dangling_association_rejects_whole_batch() {
        let store = ConfiguratorStore::start();
        store
            .create_networks(vec![test_network("n1")], &ConfigRegistry::network())
            .await
            .unwrap();

        let batch = vec![
            NetworkEntity::new(RADIO_NODE_ENTITY_TYPE, "rn1"),
            NetworkEntity::new(RADIO_GATEWAY_ENTITY_TYPE, "gw")
                .associate(EntityKey::new(RADIO_NODE_ENTITY_TYPE, "rn_missing")),
        ];
        let err = store
            .create_entities("n1", batch, &ConfigRegistry::entity())
            .await
            .unwrap_err();
        assert!(matches!(err, ConfiguratorError::UnknownAssociation { .. }));

        // nothing from the failed batch was created
        let entities = store
            .load_entities("n1", EntityLoadCriteria::full())
            .await
            .unwrap();
        assert!(entities.is_empty());
    }

    #[tokio::test]
    async fn intra_batch_associations_resolve() {
        let store = ConfiguratorStore::start();
        store
            .create_networks(vec![test_network("n1")], &ConfigRegistry::network())
            .await
            .unwrap();

        let batch = vec![
            NetworkEntity::new(RADIO_NODE_ENTITY_TYPE, "rn1"),
            NetworkEntity::new(RADIO_GATEWAY_ENTITY_TYPE, "gw")
                .config(&RadioGatewayConfig::default())
                .unwrap()
                .associate(EntityKey::new(RADIO_NODE_ENTITY_TYPE, "rn1")),
        ];
        let keys = store
            .create_entities("n1", batch, &ConfigRegistry::entity())
            .await
            .unwrap();
        assert_eq!(keys.len(), 2);
    }

    #[tokio::test]
    async fn unregistered_entity_config_is_rejected() {
        let store = ConfiguratorStore::start();
        store
            .create_networks(vec![test_network("n1")], &ConfigRegistry::network())
            .await
            .unwrap();

        // radio nodes carry no registered config payload type
        let batch = vec![
            NetworkEntity::new(RADIO_NODE_ENTITY_TYPE, "rn1")
                .config(&FeaturesConfig::default())
                .unwrap(),
        ];
        let err = store
            .create_entities("n1", batch, &ConfigRegistry::entity())
            .await
            .unwrap_err();
        assert!(matches!(err, ConfiguratorError::Serdes(_)));
    }

    #[tokio::test]
    async fn delete_and_reset_remove_state() {
        let store = ConfiguratorStore::start();
        let serdes = ConfigRegistry::network();
        store
            .create_networks(vec![test_network("n1"), test_network("n2")], &serdes)
            .await
            .unwrap();

        store.delete_network("n1").await.unwrap();
        assert_eq!(store.list_network_ids().await, vec!["n2".to_string()]);

        store.reset().await;
        assert!(store.list_network_ids().await.is_empty());
    }
}
