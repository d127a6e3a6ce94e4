use fedgrid_shared::entity::EntityKey;
use fedgrid_shared::serdes::SerdesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfiguratorError {
    #[error("network '{0}' does not exist")]
    NetworkNotFound(String),

    #[error("entity '{key}' does not exist in network '{network_id}'")]
    EntityNotFound { network_id: String, key: EntityKey },

    #[error(
        "device '{hardware_id}' of type '{device_type}' is not registered in network '{network_id}'"
    )]
    DeviceNotFound {
        network_id: String,
        device_type: String,
        hardware_id: String,
    },

    #[error("entity '{from}' in network '{network_id}' references unknown entity '{to}'")]
    UnknownAssociation {
        network_id: String,
        from: EntityKey,
        to: EntityKey,
    },

    #[error(transparent)]
    Serdes(#[from] SerdesError),
}

pub type ConfiguratorResult<T> = Result<T, ConfiguratorError>;
