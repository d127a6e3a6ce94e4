use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// Entity types known to the configuration store's entity graph.
pub const RADIO_NODE_ENTITY_TYPE: &str = "radio_node";
pub const RADIO_GATEWAY_ENTITY_TYPE: &str = "radio_gateway";
pub const MANAGED_GATEWAY_ENTITY_TYPE: &str = "managed_gateway";
pub const FEDERATION_GATEWAY_ENTITY_TYPE: &str = "federation_gateway";
pub const UPGRADE_TIER_ENTITY_TYPE: &str = "upgrade_tier";

/// Identifies an entity within one network. Keys are unique per network and
/// entity type.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityKey {
    pub entity_type: String,
    pub key: String,
}

impl EntityKey {
    pub fn new(entity_type: impl Into<String>, key: impl Into<String>) -> Self {
        EntityKey {
            entity_type: entity_type.into(),
            key: key.into(),
        }
    }
}

impl Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.key)
    }
}

/// A typed, keyed record in a network's entity graph. Associations are
/// directed references to other entities and keep their declared order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NetworkEntity {
    pub id: EntityKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associations: Vec<EntityKey>,
}

impl NetworkEntity {
    pub fn new(entity_type: impl Into<String>, key: impl Into<String>) -> Self {
        NetworkEntity {
            id: EntityKey::new(entity_type, key),
            name: None,
            description: None,
            physical_id: None,
            config: None,
            associations: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn physical_id(mut self, physical_id: impl Into<String>) -> Self {
        self.physical_id = Some(physical_id.into());
        self
    }

    /// Attach a typed config payload validated under this entity's type tag.
    pub fn config<T: Serialize>(mut self, config: &T) -> Result<Self, serde_json::Error> {
        self.config = Some(serde_json::to_value(config)?);
        Ok(self)
    }

    /// Append a directed association. Order is preserved as declared.
    pub fn associate(mut self, target: EntityKey) -> Self {
        self.associations.push(target);
        self
    }
}

impl Display for NetworkEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string_pretty(self).unwrap();
        write!(f, "{}", json)
    }
}
