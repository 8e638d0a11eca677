use tracing::{debug, warn};
use wfp::{
    CompareOp, Condition, ConditionBuilder, Error, FilterBuilder, InterfaceResolver, Layer,
    ObjectInstaller, SystemInterfaces, WeightClass,
};

use crate::guids;
use crate::rules::FirewallRule;

const TRANSPORT_DESCRIPTION: &str =
    "This filter is part of a rule that restricts inbound and outbound traffic";
const LAYER2_NAME: &str = "Block all outbound Hyper-V traffic";
const LAYER2_DESCRIPTION: &str = "This filter is part of a rule that blocks traffic from WSL";

/// Default-deny for everything: connections in both directions over IPv4 and
/// IPv6, plus layer-2 frames leaving through any interface but the tunnel adapter.
///
/// All filters sit at the lowest weight of the baseline sublayer so that any
/// permitting rule installed at a higher weight takes precedence.
pub struct BlockAll<R = SystemInterfaces> {
    resolver: R,
    adapter_name: String,
}

impl Default for BlockAll<SystemInterfaces> {
    fn default() -> Self {
        Self::new(SystemInterfaces)
    }
}

impl<R: InterfaceResolver> BlockAll<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            adapter_name: guids::TUNNEL_ADAPTER_NAME.to_owned(),
        }
    }

    pub fn with_adapter_name(mut self, adapter_name: &str) -> Self {
        self.adapter_name = adapter_name.to_owned();
        self
    }

    pub fn adapter_name(&self) -> &str {
        &self.adapter_name
    }
}

fn submit(
    installer: &mut dyn ObjectInstaller,
    filter_builder: &FilterBuilder,
    condition_builder: &ConditionBuilder,
) -> Result<(), Error> {
    let filter = filter_builder.build()?;
    condition_builder.check_layer(filter.layer)?;
    debug!(
        "adding filter {:#034x} \"{}\" at {}",
        filter.key, filter.name, filter.layer
    );
    if let Err(err) = installer.add_filter(&filter, condition_builder) {
        warn!("filter \"{}\" was not installed: {}", filter.name, err);
        return Err(err);
    }
    Ok(())
}

impl<R: InterfaceResolver> FirewallRule for BlockAll<R> {
    fn apply(&self, installer: &mut dyn ObjectInstaller) -> Result<(), Error> {
        let null_condition_builder = ConditionBuilder::null();
        let mut filter_builder = FilterBuilder::new();

        // #1 outbound connections, IPv4
        filter_builder
            .key(guids::FILTER_BASELINE_BLOCK_ALL_OUTBOUND_IPV4)
            .name("Block all outbound connections (IPv4)")
            .description(TRANSPORT_DESCRIPTION)
            .provider(guids::PROVIDER)
            .layer(Layer::FwpmLayerAleAuthConnectV4)
            .sublayer(guids::SUBLAYER_BASELINE)
            .weight(WeightClass::Min)
            .block();
        submit(installer, &filter_builder, &null_condition_builder)?;

        // #2 inbound connections, IPv4
        filter_builder
            .key(guids::FILTER_BASELINE_BLOCK_ALL_INBOUND_IPV4)
            .name("Block all inbound connections (IPv4)")
            .layer(Layer::FwpmLayerAleAuthRecvAcceptV4);
        submit(installer, &filter_builder, &null_condition_builder)?;

        // #3 outbound connections, IPv6
        filter_builder
            .key(guids::FILTER_BASELINE_BLOCK_ALL_OUTBOUND_IPV6)
            .name("Block all outbound connections (IPv6)")
            .layer(Layer::FwpmLayerAleAuthConnectV6);
        submit(installer, &filter_builder, &null_condition_builder)?;

        // #4 inbound connections, IPv6
        filter_builder
            .key(guids::FILTER_BASELINE_BLOCK_ALL_INBOUND_IPV6)
            .name("Block all inbound connections (IPv6)")
            .layer(Layer::FwpmLayerAleAuthRecvAcceptV6);
        submit(installer, &filter_builder, &null_condition_builder)?;

        // #5 layer-2 frames that bypass the ALE layers, e.g. from WSL over Hyper-V
        // switches. Without the adapter the condition would match every interface.
        let index = match self.resolver.resolve(&self.adapter_name) {
            Ok(index) => index,
            Err(err) => {
                warn!("not blocking layer-2 traffic: {}", err);
                return Err(err);
            }
        };

        let mut condition_builder = ConditionBuilder::new(Layer::FwpmLayerOutboundMacFrameNative);
        condition_builder
            .add_condition(Condition::interface_index(index, CompareOp::Neq))?
            .add_condition(Condition::l2_flags())?;

        let mut filter_builder = FilterBuilder::new();
        filter_builder
            .key(guids::FILTER_BASELINE_BLOCK_ALL_OUTBOUND_LAYER2)
            .name(LAYER2_NAME)
            .description(LAYER2_DESCRIPTION)
            .provider(guids::PROVIDER)
            .layer(Layer::FwpmLayerOutboundMacFrameNative)
            .sublayer(guids::SUBLAYER_BASELINE)
            .weight(WeightClass::Min)
            .block();
        submit(installer, &filter_builder, &condition_builder)
    }
}
