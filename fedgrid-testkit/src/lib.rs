//! Fixture provisioning for fedgrid integration tests.
//!
//! Stands up embedded backing services and provisions the standard
//! three-network federation fixture (neutral host, serving hub, federated
//! RAN) against them, then verifies the store read-back.

pub mod env;
pub mod error;
pub mod fixtures;
pub mod logging;

pub use env::TestEnv;
pub use error::{SetupError, SetupResult};
pub use fixtures::{NetworkFixtures, ProvisionedNetworks, setup_networks};
