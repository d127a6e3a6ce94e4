//! Embedded, in-process versions of the two backing services fedgrid test
//! suites provision against: the configuration-entity store and the gateway
//! device registry. These are the test instances a suite starts once per
//! process; production deployments talk to the real services instead.

pub mod error;
pub mod registry;
pub mod store;

pub use error::{ConfiguratorError, ConfiguratorResult};
pub use registry::{DeviceRecord, DeviceRegistry};
pub use store::{ConfiguratorStore, EntityLoadCriteria, NetworkLoadCriteria};
