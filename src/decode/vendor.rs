// Thu Oct 15 2026 - Alex

use bitflags::bitflags;
use serde::{Serialize, Serializer};
use std::fmt;

/// 24-bit IEEE OUI, stored in a vendor block least significant byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oui(pub u32);

impl Oui {
    pub const HDMI_LICENSING: Oui = Oui(0x000C03);
    pub const HDMI_FORUM: Oui = Oui(0xC45DD8);

    pub fn from_wire(bytes: [u8; 3]) -> Self {
        Oui(u32::from_be_bytes([0, bytes[2], bytes[1], bytes[0]]))
    }
}

impl fmt::Display for Oui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06x}", self.0)
    }
}

impl Serialize for Oui {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

bitflags! {
    /// HDMI 1.4 VSDB byte 6.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct HdmiFeatures: u8 {
        const SUPPORTS_AI = 0x80;
        const DC_48BIT = 0x40;
        const DC_36BIT = 0x20;
        const DC_30BIT = 0x10;
        const DC_Y444 = 0x08;
        const DVI_DUAL = 0x01;
    }

    /// HDMI 1.4 VSDB byte 8, low nibble.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct ContentTypes: u8 {
        const GRAPHICS = 0x01;
        const PHOTO = 0x02;
        const CINEMA = 0x04;
        const GAME = 0x08;
    }

    /// HDMI Forum VSDB byte 6.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct ScdcFeatures: u8 {
        const SCDC_PRESENT = 0x80;
        const RR_CAPABLE = 0x40;
        const CCBPCI = 0x10;
        const LTE_340MCSC_SCRAMBLE = 0x08;
        const INDEPENDENT_VIEW_3D = 0x04;
        const DUAL_VIEW_3D = 0x02;
        const OSD_DISPARITY_3D = 0x01;
    }

    /// HDMI Forum VSDB byte 7, low nibble.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct DeepColor420: u8 {
        const UHD_VIC = 0x08;
        const DC_48BIT_420 = 0x04;
        const DC_36BIT_420 = 0x02;
        const DC_30BIT_420 = 0x01;
    }

    /// HDMI Forum VSDB byte 8.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct VrrFeatures: u8 {
        const M_DELTA = 0x20;
        const CINEMA_VRR = 0x10;
        const CNM_VRR = 0x08;
        const FVA = 0x04;
        const ALLM = 0x02;
        const FAPA_START_LOCATION = 0x01;
    }

    /// HDMI Forum VSDB byte 11.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct DscFeatures: u8 {
        const DSC_1P2 = 0x80;
        const DSC_NATIVE_420 = 0x40;
        const DSC_ALL_BPP = 0x08;
        const DSC_16BPC = 0x04;
        const DSC_12BPC = 0x02;
        const DSC_10BPC = 0x01;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhysicalAddress(pub [u8; 4]);

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HdmiVsdb {
    pub physical_address: Option<PhysicalAddress>,
    pub features: Option<HdmiFeatures>,
    pub max_tmds_clock_mhz: Option<u16>,
    pub content_types: Option<ContentTypes>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VrrRange {
    pub min_hz: u8,
    pub max_hz: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HdmiForumVsdb {
    pub version: Option<u8>,
    pub max_tmds_rate_mhz: Option<u16>,
    pub scdc: Option<ScdcFeatures>,
    pub max_frl_rate: Option<u8>,
    pub deep_color_420: Option<DeepColor420>,
    pub vrr_features: Option<VrrFeatures>,
    pub vrr_range: Option<VrrRange>,
    pub dsc: Option<DscFeatures>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "vendor", rename_all = "snake_case")]
pub enum VendorBlock {
    HdmiLicensing(HdmiVsdb),
    HdmiForum(HdmiForumVsdb),
    Other {
        oui: Option<Oui>,
        payload: Vec<u8>,
    },
}

impl VendorBlock {
    /// `block` starts at the tag byte; byte `n` of the block is only read
    /// when the declared length reaches it.
    pub fn decode(block: &[u8]) -> Self {
        let oui = match block.get(1..4) {
            Some(&[a, b, c]) => Oui::from_wire([a, b, c]),
            _ => {
                return VendorBlock::Other {
                    oui: None,
                    payload: block.get(1..).unwrap_or_default().to_vec(),
                }
            }
        };
        log::debug!("Vendor-specific block with OUI {}", oui);

        let view = BlockView { block };
        match oui {
            Oui::HDMI_LICENSING => VendorBlock::HdmiLicensing(decode_hdmi(&view)),
            Oui::HDMI_FORUM => VendorBlock::HdmiForum(decode_hdmi_forum(&view)),
            other => VendorBlock::Other {
                oui: Some(other),
                payload: block[1..].to_vec(),
            },
        }
    }

    pub fn oui(&self) -> Option<Oui> {
        match self {
            VendorBlock::HdmiLicensing(_) => Some(Oui::HDMI_LICENSING),
            VendorBlock::HdmiForum(_) => Some(Oui::HDMI_FORUM),
            VendorBlock::Other { oui, .. } => *oui,
        }
    }
}

struct BlockView<'a> {
    block: &'a [u8],
}

impl BlockView<'_> {
    fn byte(&self, n: usize) -> Option<u8> {
        self.block.get(n).copied()
    }
}

fn decode_hdmi(v: &BlockView<'_>) -> HdmiVsdb {
    let physical_address = match (v.byte(4), v.byte(5)) {
        (Some(ab), Some(cd)) => Some(PhysicalAddress([ab >> 4, ab & 0x0F, cd >> 4, cd & 0x0F])),
        _ => None,
    };
    HdmiVsdb {
        physical_address,
        features: v.byte(6).map(HdmiFeatures::from_bits_truncate),
        max_tmds_clock_mhz: v.byte(7).filter(|&b| b != 0).map(|b| b as u16 * 5),
        content_types: v.byte(8).map(ContentTypes::from_bits_truncate),
    }
}

fn decode_hdmi_forum(v: &BlockView<'_>) -> HdmiForumVsdb {
    let vrr_range = match (v.byte(9), v.byte(10)) {
        (Some(b9), Some(b10)) => Some(VrrRange {
            min_hz: b9 & 0x3F,
            max_hz: (((b9 & 0xC0) as u16) << 2) | b10 as u16,
        }),
        _ => None,
    };
    HdmiForumVsdb {
        version: v.byte(4),
        max_tmds_rate_mhz: v.byte(5).map(|b| b as u16 * 5),
        scdc: v.byte(6).map(ScdcFeatures::from_bits_truncate),
        max_frl_rate: v.byte(7).map(|b| b >> 4),
        deep_color_420: v.byte(7).map(DeepColor420::from_bits_truncate),
        vrr_features: v.byte(8).map(VrrFeatures::from_bits_truncate),
        vrr_range,
        dsc: v.byte(11).map(DscFeatures::from_bits_truncate),
    }
}
