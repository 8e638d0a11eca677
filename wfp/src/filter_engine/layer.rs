use core::fmt;

use crate::Guid;

/// Filtering points a filter can be attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    FwpmLayerAleAuthConnectV4,
    FwpmLayerAleAuthConnectV6,
    FwpmLayerAleAuthRecvAcceptV4,
    FwpmLayerAleAuthRecvAcceptV6,
    FwpmLayerInboundMacFrameNative,
    FwpmLayerOutboundMacFrameNative,
}

impl Layer {
    pub fn get_guid(&self) -> Guid {
        return match self {
            Layer::FwpmLayerAleAuthConnectV4 => 0xc38d57d1_05a7_4c33_904f_7fbceee60e82,
            Layer::FwpmLayerAleAuthConnectV6 => 0x4a72393b_319f_44bc_84c3_ba54dcb3b6b4,
            Layer::FwpmLayerAleAuthRecvAcceptV4 => 0xe1cd9fe7_f4b5_4273_96c0_592e487b8650,
            Layer::FwpmLayerAleAuthRecvAcceptV6 => 0xa3b42c97_9f04_4672_b87e_cee9c483257f,
            Layer::FwpmLayerInboundMacFrameNative => 0xd4220bd3_62ce_4f08_ae88_b56e8526df50,
            Layer::FwpmLayerOutboundMacFrameNative => 0x94c44912_9d6f_4ebf_b995_05ab8a088d1b,
        };
    }

    /// Layer-2 layers see raw frames, not connections.
    pub fn is_mac_frame(&self) -> bool {
        matches!(
            self,
            Layer::FwpmLayerInboundMacFrameNative | Layer::FwpmLayerOutboundMacFrameNative
        )
    }

    pub fn is_ale_auth(&self) -> bool {
        matches!(
            self,
            Layer::FwpmLayerAleAuthConnectV4
                | Layer::FwpmLayerAleAuthConnectV6
                | Layer::FwpmLayerAleAuthRecvAcceptV4
                | Layer::FwpmLayerAleAuthRecvAcceptV6
        )
    }

    pub fn is_ipv6(&self) -> bool {
        matches!(
            self,
            Layer::FwpmLayerAleAuthConnectV6 | Layer::FwpmLayerAleAuthRecvAcceptV6
        )
    }

    pub fn is_outbound(&self) -> bool {
        matches!(
            self,
            Layer::FwpmLayerAleAuthConnectV4
                | Layer::FwpmLayerAleAuthConnectV6
                | Layer::FwpmLayerOutboundMacFrameNative
        )
    }

    fn as_str(&self) -> &'static str {
        match self {
            Layer::FwpmLayerAleAuthConnectV4 => "FWPM_LAYER_ALE_AUTH_CONNECT_V4",
            Layer::FwpmLayerAleAuthConnectV6 => "FWPM_LAYER_ALE_AUTH_CONNECT_V6",
            Layer::FwpmLayerAleAuthRecvAcceptV4 => "FWPM_LAYER_ALE_AUTH_RECV_ACCEPT_V4",
            Layer::FwpmLayerAleAuthRecvAcceptV6 => "FWPM_LAYER_ALE_AUTH_RECV_ACCEPT_V6",
            Layer::FwpmLayerInboundMacFrameNative => "FWPM_LAYER_INBOUND_MAC_FRAME_NATIVE",
            Layer::FwpmLayerOutboundMacFrameNative => "FWPM_LAYER_OUTBOUND_MAC_FRAME_NATIVE",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
