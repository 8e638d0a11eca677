use rand::Rng;
use wfp::{
    Action, CompareOp, Condition, ConditionBuilder, Error, Filter, InterfaceResolver, Layer,
    ObjectInstaller, WeightClass,
};
use winfw::{guids, BlockAll, FirewallRule};

const TRANSPORT_DESCRIPTION: &str =
    "This filter is part of a rule that restricts inbound and outbound traffic";
const LAYER2_DESCRIPTION: &str = "This filter is part of a rule that blocks traffic from WSL";

/// Records every submission. Optionally rejects the n-th one (1-based).
#[derive(Default)]
struct RecordingInstaller {
    submissions: Vec<(Filter, ConditionBuilder)>,
    reject_at: Option<usize>,
}

impl RecordingInstaller {
    fn rejecting_at(n: usize) -> Self {
        Self {
            reject_at: Some(n),
            ..Default::default()
        }
    }

    fn keys(&self) -> Vec<u128> {
        self.submissions.iter().map(|(f, _)| f.key).collect()
    }

    fn layers(&self) -> Vec<Layer> {
        self.submissions.iter().map(|(f, _)| f.layer).collect()
    }
}

impl ObjectInstaller for RecordingInstaller {
    fn add_filter(&mut self, filter: &Filter, conditions: &ConditionBuilder) -> Result<(), Error> {
        self.submissions.push((filter.clone(), conditions.clone()));
        if self.reject_at == Some(self.submissions.len()) {
            return Err(Error::Rejected {
                name: filter.name.clone(),
            });
        }
        Ok(())
    }
}

/// Knows a single adapter, or none at all.
struct FixedResolver {
    name: &'static str,
    index: Option<u32>,
}

impl FixedResolver {
    fn mullvad(index: u32) -> Self {
        Self {
            name: guids::TUNNEL_ADAPTER_NAME,
            index: Some(index),
        }
    }

    fn missing() -> Self {
        Self {
            name: guids::TUNNEL_ADAPTER_NAME,
            index: None,
        }
    }
}

impl InterfaceResolver for FixedResolver {
    fn index_of(&self, name: &str) -> Option<u32> {
        if name == self.name {
            self.index
        } else {
            None
        }
    }
}

fn apply_with(index: u32) -> (Result<(), Error>, RecordingInstaller) {
    let mut installer = RecordingInstaller::default();
    let result = BlockAll::new(FixedResolver::mullvad(index)).apply(&mut installer);
    (result, installer)
}

#[test]
fn happy_path_installs_five_filters_in_order() {
    let (result, installer) = apply_with(42);

    assert!(result.is_ok());
    assert_eq!(installer.keys(), guids::baseline_filters().to_vec());
    assert_eq!(
        installer.keys(),
        vec![
            guids::FILTER_BASELINE_BLOCK_ALL_OUTBOUND_IPV4,
            guids::FILTER_BASELINE_BLOCK_ALL_INBOUND_IPV4,
            guids::FILTER_BASELINE_BLOCK_ALL_OUTBOUND_IPV6,
            guids::FILTER_BASELINE_BLOCK_ALL_INBOUND_IPV6,
            guids::FILTER_BASELINE_BLOCK_ALL_OUTBOUND_LAYER2,
        ]
    );

    let (_, conditions) = &installer.submissions[4];
    assert_eq!(
        conditions.conditions()[0],
        Condition::interface_index(42, CompareOp::Neq)
    );
}

#[test]
fn layers_in_order() {
    let (_, installer) = apply_with(1);
    assert_eq!(
        installer.layers(),
        vec![
            Layer::FwpmLayerAleAuthConnectV4,
            Layer::FwpmLayerAleAuthRecvAcceptV4,
            Layer::FwpmLayerAleAuthConnectV6,
            Layer::FwpmLayerAleAuthRecvAcceptV6,
            Layer::FwpmLayerOutboundMacFrameNative,
        ]
    );
}

#[test]
fn ipv6_filters_use_ipv6_layers() {
    let (_, installer) = apply_with(1);
    for (filter, _) in &installer.submissions[2..4] {
        assert!(filter.layer.is_ipv6(), "{}", filter.name);
        assert!(filter.name.ends_with("(IPv6)"));
    }
    assert!(installer.submissions[2].0.layer.is_outbound());
    assert!(!installer.submissions[3].0.layer.is_outbound());
}

#[test]
fn common_attributes_carry_forward() {
    let (_, installer) = apply_with(1);
    for (filter, _) in &installer.submissions {
        assert_eq!(filter.provider, guids::PROVIDER, "{}", filter.name);
        assert_eq!(filter.sublayer, guids::SUBLAYER_BASELINE, "{}", filter.name);
        assert_eq!(filter.weight, WeightClass::Min, "{}", filter.name);
        assert_eq!(filter.action, Action::Block, "{}", filter.name);
    }
}

#[test]
fn every_filter_sits_at_the_weight_floor() {
    let (_, installer) = apply_with(1);
    assert!(installer
        .submissions
        .iter()
        .all(|(filter, _)| filter.weight.value() == 0));
}

#[test]
fn names_and_descriptions() {
    let (_, installer) = apply_with(1);
    let names: Vec<&str> = installer
        .submissions
        .iter()
        .map(|(f, _)| f.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Block all outbound connections (IPv4)",
            "Block all inbound connections (IPv4)",
            "Block all outbound connections (IPv6)",
            "Block all inbound connections (IPv6)",
            "Block all outbound Hyper-V traffic",
        ]
    );

    for (filter, _) in &installer.submissions[..4] {
        assert_eq!(filter.description.as_deref(), Some(TRANSPORT_DESCRIPTION));
    }
    assert_eq!(
        installer.submissions[4].0.description.as_deref(),
        Some(LAYER2_DESCRIPTION)
    );
}

#[test]
fn only_the_layer2_filter_has_conditions() {
    let (_, installer) = apply_with(7);
    for (_, conditions) in &installer.submissions[..4] {
        assert!(conditions.is_empty());
        assert_eq!(conditions.layer(), None);
    }

    let (_, conditions) = &installer.submissions[4];
    assert_eq!(conditions.layer(), Some(Layer::FwpmLayerOutboundMacFrameNative));
    assert_eq!(
        conditions.conditions(),
        &[
            Condition::InterfaceIndex {
                op: CompareOp::Neq,
                index: 7,
            },
            Condition::L2Flags,
        ]
    );
}

#[test]
fn aborts_on_first_rejection() {
    for n in 1..=5 {
        let mut installer = RecordingInstaller::rejecting_at(n);
        let result = BlockAll::new(FixedResolver::mullvad(42)).apply(&mut installer);

        assert!(matches!(result, Err(Error::Rejected { .. })), "reject at {n}");
        assert_eq!(installer.submissions.len(), n, "reject at {n}");
        assert_eq!(installer.keys(), guids::baseline_filters()[..n].to_vec());
    }
}

#[test]
fn rejection_at_third_filter() {
    let mut installer = RecordingInstaller::rejecting_at(3);
    let rule = BlockAll::new(FixedResolver::mullvad(42));

    assert!(!rule.try_apply(&mut installer));
    assert_eq!(
        installer.keys(),
        vec![
            guids::FILTER_BASELINE_BLOCK_ALL_OUTBOUND_IPV4,
            guids::FILTER_BASELINE_BLOCK_ALL_INBOUND_IPV4,
            guids::FILTER_BASELINE_BLOCK_ALL_OUTBOUND_IPV6,
        ]
    );
}

#[test]
fn random_rejection_point() {
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let n = rng.gen_range(1..=5);
        let mut installer = RecordingInstaller::rejecting_at(n);
        let rule = BlockAll::new(FixedResolver::mullvad(rng.gen_range(1..u32::MAX)));
        assert!(!rule.try_apply(&mut installer));
        assert_eq!(installer.submissions.len(), n);
    }
}

#[test]
fn reapply_submits_identical_filters() {
    let mut installer = RecordingInstaller::default();
    let rule = BlockAll::new(FixedResolver::mullvad(42));

    assert!(rule.try_apply(&mut installer));
    assert!(rule.try_apply(&mut installer));

    assert_eq!(installer.submissions.len(), 10);
    let (first, second) = installer.submissions.split_at(5);
    assert_eq!(first, second);
}

#[test]
fn missing_adapter_fails_before_layer2_filter() {
    let mut installer = RecordingInstaller::default();
    let result = BlockAll::new(FixedResolver::missing()).apply(&mut installer);

    assert!(matches!(
        result,
        Err(Error::InterfaceNotFound(name)) if name == guids::TUNNEL_ADAPTER_NAME
    ));
    assert_eq!(installer.submissions.len(), 4);
    assert!(!installer
        .keys()
        .contains(&guids::FILTER_BASELINE_BLOCK_ALL_OUTBOUND_LAYER2));
}

#[test]
fn layer2_condition_carries_resolved_index() {
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let index = rng.gen_range(1..u32::MAX);
        let (result, installer) = apply_with(index);
        assert!(result.is_ok());
        assert_eq!(
            installer.submissions[4].1.conditions()[0],
            Condition::interface_index(index, CompareOp::Neq)
        );
    }
}

#[test]
fn adapter_name_can_be_overridden() {
    let resolver = FixedResolver {
        name: "wg0",
        index: Some(9),
    };

    let mut installer = RecordingInstaller::default();
    let rule = BlockAll::new(&resolver).with_adapter_name("wg0");
    assert_eq!(rule.adapter_name(), "wg0");
    assert!(rule.try_apply(&mut installer));
    assert_eq!(
        installer.submissions[4].1.conditions()[0],
        Condition::interface_index(9, CompareOp::Neq)
    );

    // The default name is unknown to this resolver.
    let mut installer = RecordingInstaller::default();
    let rule = BlockAll::new(&resolver);
    assert_eq!(rule.adapter_name(), guids::TUNNEL_ADAPTER_NAME);
    assert!(!rule.try_apply(&mut installer));
    assert_eq!(installer.submissions.len(), 4);
}
