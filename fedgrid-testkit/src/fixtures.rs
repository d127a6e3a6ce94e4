//! The standard federation fixture: a neutral-host network, a serving-hub
//! network and a federated RAN network, with their gateway entity graphs and
//! registered gateway devices.

use fedgrid_configurator::NetworkLoadCriteria;
use fedgrid_shared::device::{GATEWAY_RECORD_TYPE, GatewayDevice};
use fedgrid_shared::entity::{
    EntityKey, FEDERATION_GATEWAY_ENTITY_TYPE, MANAGED_GATEWAY_ENTITY_TYPE,
    NetworkEntity, RADIO_GATEWAY_ENTITY_TYPE, RADIO_NODE_ENTITY_TYPE, UPGRADE_TIER_ENTITY_TYPE,
};
use fedgrid_shared::federation::{
    DnsConfig, FeaturesConfig, FederatedCoreConfig, FederationConfig, RadioNetworkConfig,
};
use fedgrid_shared::gateway::{
    CoreGatewayParams, ManagedGatewayConfig, RadioGatewayConfig, RadioGatewayParams,
};
use fedgrid_shared::network::{
    DNS_CONFIG_TYPE, FEATURES_CONFIG_TYPE, FEDERATED_CORE_CONFIG_TYPE, FEDERATION_CONFIG_TYPE,
    FEDERATED_RAN_NETWORK_TYPE, FEDERATION_NETWORK_TYPE, Network, RADIO_CONFIG_TYPE,
};
use fedgrid_shared::serdes::ConfigRegistry;
use uuid::Uuid;

use crate::env::TestEnv;
use crate::error::{SetupError, SetupResult};

pub const NH_NETWORK_ID: &str = "nh";
pub const SERVING_NETWORK_ID: &str = "serving_hub";
pub const FEDERATED_NETWORK_ID: &str = "federated_ran";
pub const NH_SUBSCRIBER_ID: &str = "123456000000101";
pub const RAN_GATEWAY_ID: &str = "ran_gw";
pub const RAN_GATEWAY_HW_ID: &str = "ran_gw_hw";
pub const HUB_GATEWAY_ID: &str = "hub_gw";
pub const HUB_GATEWAY_HW_ID: &str = "hub_gw_hw";
pub const UPGRADE_TIER_ID: &str = "t1";
pub const RADIO_NODE_IDS: [&str; 2] = ["rn1", "rn2"];

/// The network definitions a provisioning run submitted, returned for
/// further assertions by callers.
#[derive(Debug, Clone)]
pub struct ProvisionedNetworks {
    pub neutral_host: Network,
    pub serving: Network,
    pub federated: Network,
}

/// Parameterized inputs for the federation fixture. `Default` matches the
/// canonical identifiers above; `unique` derives a disjoint set for suites
/// that share one store.
#[derive(Debug, Clone)]
pub struct NetworkFixtures {
    pub nh_network_id: String,
    pub serving_network_id: String,
    pub federated_network_id: String,
    pub nh_subscriber_id: String,
    pub ran_gateway_id: String,
    pub ran_gateway_hw_id: String,
    pub hub_gateway_id: String,
    pub hub_gateway_hw_id: String,
    pub upgrade_tier_id: String,
    pub radio_node_ids: Vec<String>,
}

impl Default for NetworkFixtures {
    fn default() -> Self {
        NetworkFixtures {
            nh_network_id: NH_NETWORK_ID.to_string(),
            serving_network_id: SERVING_NETWORK_ID.to_string(),
            federated_network_id: FEDERATED_NETWORK_ID.to_string(),
            nh_subscriber_id: NH_SUBSCRIBER_ID.to_string(),
            ran_gateway_id: RAN_GATEWAY_ID.to_string(),
            ran_gateway_hw_id: RAN_GATEWAY_HW_ID.to_string(),
            hub_gateway_id: HUB_GATEWAY_ID.to_string(),
            hub_gateway_hw_id: HUB_GATEWAY_HW_ID.to_string(),
            upgrade_tier_id: UPGRADE_TIER_ID.to_string(),
            radio_node_ids: RADIO_NODE_IDS.iter().map(|id| id.to_string()).collect(),
        }
    }
}

impl NetworkFixtures {
    /// Default identifiers suffixed with a random tag, so several fixture
    /// sets can live in one store without colliding.
    pub fn unique() -> Self {
        let uuid = Uuid::new_v4().simple().to_string();
        let tag = &uuid[..8];
        NetworkFixtures {
            nh_network_id: format!("{NH_NETWORK_ID}_{tag}"),
            serving_network_id: format!("{SERVING_NETWORK_ID}_{tag}"),
            federated_network_id: format!("{FEDERATED_NETWORK_ID}_{tag}"),
            nh_subscriber_id: NH_SUBSCRIBER_ID.to_string(),
            ran_gateway_id: format!("{RAN_GATEWAY_ID}_{tag}"),
            ran_gateway_hw_id: format!("{RAN_GATEWAY_HW_ID}_{tag}"),
            hub_gateway_id: format!("{HUB_GATEWAY_ID}_{tag}"),
            hub_gateway_hw_id: format!("{HUB_GATEWAY_HW_ID}_{tag}"),
            upgrade_tier_id: format!("{UPGRADE_TIER_ID}_{tag}"),
            radio_node_ids: RADIO_NODE_IDS.iter().map(|id| format!("{id}_{tag}")).collect(),
        }
    }

    /// Route prefix announced by the neutral host: the first 6 digits of the
    /// subscriber id.
    pub fn route_prefix(&self) -> &str {
        self.nh_subscriber_id.get(..6).unwrap_or(&self.nh_subscriber_id)
    }

    /// Provision the fixture into the given environment:
    /// 1. batch-create the three networks,
    /// 2. create the federated RAN entity graph and register its gateway,
    /// 3. create the serving hub entity graph and register its gateway,
    /// 4. read the neutral-host and serving networks back and verify they
    ///    match what was submitted.
    ///
    /// There is no rollback: the first failing call aborts provisioning and
    /// leaves earlier state in place.
    pub async fn provision(&self, env: &TestEnv) -> SetupResult<ProvisionedNetworks> {
        let network_serdes = ConfigRegistry::network();
        let entity_serdes = ConfigRegistry::entity();
        let device_serdes = ConfigRegistry::device();

        let mut nh_cfg = FederationConfig::default();
        nh_cfg
            .nh_routes
            .insert(self.route_prefix().to_string(), self.serving_network_id.clone());
        nh_cfg.served_network_ids = vec![self.federated_network_id.clone()];

        let mut serving_cfg = FederationConfig::default();
        serving_cfg.served_nh_ids = vec![self.nh_network_id.clone()];

        let core_cfg = FederatedCoreConfig {
            federation_network_id: Some(self.nh_network_id.clone()),
        };

        let neutral_host = Network::new(&self.nh_network_id, FEDERATION_NETWORK_TYPE)
            .name("TestNeutralHost")
            .description("Test Neutral Host")
            .with_config(FEDERATION_CONFIG_TYPE, &nh_cfg)?
            .with_config(FEATURES_CONFIG_TYPE, &FeaturesConfig::default())?
            .with_config(DNS_CONFIG_TYPE, &DnsConfig::default())?;

        let serving = Network::new(&self.serving_network_id, FEDERATION_NETWORK_TYPE)
            .name("serving_hub_network")
            .description("Serving Hub Network")
            .with_config(FEDERATION_CONFIG_TYPE, &serving_cfg)?
            .with_config(FEATURES_CONFIG_TYPE, &FeaturesConfig::default())?
            .with_config(DNS_CONFIG_TYPE, &DnsConfig::default())?;

        let federated = Network::new(&self.federated_network_id, FEDERATED_RAN_NETWORK_TYPE)
            .name("Federated_RAN_Network")
            .description("Federated RAN Network")
            .with_config(FEDERATED_CORE_CONFIG_TYPE, &core_cfg)?
            .with_config(RADIO_CONFIG_TYPE, &RadioNetworkConfig::default())?
            .with_config(FEATURES_CONFIG_TYPE, &FeaturesConfig::default())?
            .with_config(DNS_CONFIG_TYPE, &DnsConfig::default())?;

        env.configurator
            .create_networks(
                vec![neutral_host.clone(), serving.clone(), federated.clone()],
                &network_serdes,
            )
            .await?;

        // Federated RAN graph: radio nodes, a radio gateway associated to
        // them, a managed gateway wrapping it and an upgrade tier on top.
        let radio_gateway_cfg = RadioGatewayConfig {
            core: CoreGatewayParams {
                nat_enabled: true,
                ip_block: "192.168.0.0/24".to_string(),
            },
            radio: RadioGatewayParams {
                pci: 260,
                transmit_enabled: true,
            },
        };

        let mut ran_entities: Vec<NetworkEntity> = self
            .radio_node_ids
            .iter()
            .map(|id| NetworkEntity::new(RADIO_NODE_ENTITY_TYPE, id))
            .collect();

        let mut radio_gateway = NetworkEntity::new(RADIO_GATEWAY_ENTITY_TYPE, &self.ran_gateway_id)
            .config(&radio_gateway_cfg)?;
        for id in &self.radio_node_ids {
            radio_gateway = radio_gateway.associate(EntityKey::new(RADIO_NODE_ENTITY_TYPE, id));
        }
        ran_entities.push(radio_gateway);
        ran_entities.push(
            NetworkEntity::new(MANAGED_GATEWAY_ENTITY_TYPE, &self.ran_gateway_id)
                .name("ran_gateway")
                .description("federated ran gateway")
                .physical_id(&self.ran_gateway_hw_id)
                .config(&ManagedGatewayConfig::default())?
                .associate(EntityKey::new(RADIO_GATEWAY_ENTITY_TYPE, &self.ran_gateway_id)),
        );
        ran_entities.push(
            NetworkEntity::new(UPGRADE_TIER_ENTITY_TYPE, &self.upgrade_tier_id)
                .associate(EntityKey::new(MANAGED_GATEWAY_ENTITY_TYPE, &self.ran_gateway_id)),
        );

        env.configurator
            .create_entities(&self.federated_network_id, ran_entities, &entity_serdes)
            .await?;
        env.devices
            .register_device(
                &self.federated_network_id,
                GATEWAY_RECORD_TYPE,
                &self.ran_gateway_hw_id,
                &GatewayDevice::echo(&self.ran_gateway_hw_id),
                &device_serdes,
            )
            .await?;

        // Serving hub graph: no radio nodes, a federation gateway instead.
        let hub_entities = vec![
            NetworkEntity::new(FEDERATION_GATEWAY_ENTITY_TYPE, &self.hub_gateway_id),
            NetworkEntity::new(MANAGED_GATEWAY_ENTITY_TYPE, &self.hub_gateway_id)
                .name("hub_gateway")
                .description("federation gateway")
                .physical_id(&self.hub_gateway_hw_id)
                .config(&ManagedGatewayConfig::default())?
                .associate(EntityKey::new(FEDERATION_GATEWAY_ENTITY_TYPE, &self.hub_gateway_id)),
            NetworkEntity::new(UPGRADE_TIER_ENTITY_TYPE, &self.upgrade_tier_id)
                .associate(EntityKey::new(MANAGED_GATEWAY_ENTITY_TYPE, &self.hub_gateway_id)),
        ];
        env.configurator
            .create_entities(&self.serving_network_id, hub_entities, &entity_serdes)
            .await?;
        env.devices
            .register_device(
                &self.serving_network_id,
                GATEWAY_RECORD_TYPE,
                &self.hub_gateway_hw_id,
                &GatewayDevice::echo(&self.hub_gateway_hw_id),
                &device_serdes,
            )
            .await?;

        verify_readback(env, &neutral_host, &network_serdes).await?;
        verify_readback(env, &serving, &network_serdes).await?;

        tracing::info!(
            nh = %self.nh_network_id,
            serving = %self.serving_network_id,
            federated = %self.federated_network_id,
            "provisioned federation fixture"
        );

        Ok(ProvisionedNetworks {
            neutral_host,
            serving,
            federated,
        })
    }
}

/// Provision the canonical fixture into the given environment.
pub async fn setup_networks(env: &TestEnv) -> SetupResult<ProvisionedNetworks> {
    NetworkFixtures::default().provision(env).await
}

async fn verify_readback(
    env: &TestEnv,
    expected: &Network,
    serdes: &ConfigRegistry,
) -> SetupResult<()> {
    let loaded = env
        .configurator
        .load_network(&expected.id, NetworkLoadCriteria::full(), serdes)
        .await?;
    if &loaded != expected {
        tracing::warn!(network_id = %expected.id, "read-back does not match submitted network");
        return Err(SetupError::ReadbackMismatch {
            network_id: expected.id.clone(),
        });
    }
    Ok(())
}
