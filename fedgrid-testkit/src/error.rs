use fedgrid_configurator::ConfiguratorError;
use thiserror::Error;

/// Error type for fixture provisioning.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Configurator(#[from] ConfiguratorError),

    #[error("invalid fixture config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("network '{network_id}' did not read back equal to the submitted definition")]
    ReadbackMismatch { network_id: String },
}

pub type SetupResult<T> = Result<T, SetupError>;
