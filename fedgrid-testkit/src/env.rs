use std::sync::Arc;

use fedgrid_configurator::{ConfiguratorStore, DeviceRegistry};
use once_cell::sync::OnceCell;

static SHARED_ENV: OnceCell<TestEnv> = OnceCell::new();

/// Handles to the backing services a fixture provisions against. Owning the
/// handle (instead of hiding it behind module globals) is what lets suites
/// run isolated environments side by side.
#[derive(Debug, Clone)]
pub struct TestEnv {
    pub configurator: Arc<ConfiguratorStore>,
    pub devices: Arc<DeviceRegistry>,
}

impl TestEnv {
    /// Start a fresh, caller-owned environment. Each call gets isolated
    /// service instances.
    pub fn init() -> Self {
        crate::logging::init_logging("info");
        TestEnv {
            configurator: ConfiguratorStore::start(),
            devices: DeviceRegistry::start(),
        }
    }

    /// The process-wide environment. The first caller starts the backing
    /// services; every later caller gets the same handles, so the expensive
    /// bootstrap runs exactly once per process.
    pub fn shared() -> &'static TestEnv {
        SHARED_ENV.get_or_init(TestEnv::init)
    }

    /// Explicitly drop everything provisioned into this environment.
    pub async fn teardown(&self) {
        self.configurator.reset().await;
        self.devices.reset().await;
    }
}
