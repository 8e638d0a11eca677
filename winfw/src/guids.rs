//! Stable identities of every engine object the firewall installs.
//!
//! The keys never change between runs, so a new apply can find and replace
//! whatever a previous session left behind.

use wfp::Guid;

pub const PROVIDER: Guid = 0xe2c114ee_f32a_4264_a6cb_3fa7996356d9;
pub const PROVIDER_NAME: &str = "Mullvad VPN";
pub const PROVIDER_DESCRIPTION: &str = "Mullvad VPN firewall provider";

pub const SUBLAYER_BASELINE: Guid = 0xc78056ff_2bc1_4211_aadd_7f358def202d;
pub const SUBLAYER_BASELINE_NAME: &str = "Mullvad VPN baseline";
pub const SUBLAYER_BASELINE_DESCRIPTION: &str =
    "Filters that enforce a good baseline for the firewall";
pub const SUBLAYER_BASELINE_WEIGHT: u16 = 0xFFFF;

/// The virtual adapter that carries tunnel traffic.
pub const TUNNEL_ADAPTER_NAME: &str = "Mullvad";

pub const FILTER_BASELINE_BLOCK_ALL_OUTBOUND_IPV4: Guid = 0x2df892a0_059f_4051_b0ca_51bb079d9f5c;
pub const FILTER_BASELINE_BLOCK_ALL_INBOUND_IPV4: Guid = 0x79ff8278_0309_44f8_b4d0_c59936ccc652;
pub const FILTER_BASELINE_BLOCK_ALL_OUTBOUND_IPV6: Guid = 0x458f52fb_15ed_45dc_808e_1de6bb19a821;
pub const FILTER_BASELINE_BLOCK_ALL_INBOUND_IPV6: Guid = 0xa2034e68_4634_4257_a4aa_450aa6d41b17;
pub const FILTER_BASELINE_BLOCK_ALL_OUTBOUND_LAYER2: Guid = 0x76038562_b662_45a5_b734_689e2b9071ed;

/// Baseline filter keys in the order they are applied.
pub fn baseline_filters() -> [Guid; 5] {
    [
        FILTER_BASELINE_BLOCK_ALL_OUTBOUND_IPV4,
        FILTER_BASELINE_BLOCK_ALL_INBOUND_IPV4,
        FILTER_BASELINE_BLOCK_ALL_OUTBOUND_IPV6,
        FILTER_BASELINE_BLOCK_ALL_INBOUND_IPV6,
        FILTER_BASELINE_BLOCK_ALL_OUTBOUND_LAYER2,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        let mut keys = baseline_filters().to_vec();
        keys.push(PROVIDER);
        keys.push(SUBLAYER_BASELINE);
        let count = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), count);
    }
}
