// Thu Oct 15 2026 - Alex

use crate::decode::descriptor::{Descriptor, DESCRIPTOR_SIZE};
use crate::edid::{ChecksumStatus, BLOCK_SIZE, EXTENSION_COUNT_OFFSET, HEADER};
use bitflags::bitflags;
use serde::Serialize;

pub const VERSION_OFFSET: usize = 18;
pub const INPUT_OFFSET: usize = 20;
pub const FEATURES_OFFSET: usize = 24;
pub const DESCRIPTOR_OFFSETS: [usize; 4] = [54, 72, 90, 108];

pub const COLOR_FORMAT_MASK: u8 = 0b0001_1000;
pub const SRGB_BIT: u8 = 0b0000_0100;

/// EDID 1.4, the first revision with the digital color-encoding table.
pub const VERSION_1_4: u16 = 0x0104;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct DpmsFlags: u8 {
        const STANDBY = 0b1000_0000;
        const SUSPEND = 0b0100_0000;
        const ACTIVE_OFF = 0b0010_0000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitalInterface {
    Undefined,
    Dvi,
    HdmiA,
    HdmiB,
    Mddi,
    DisplayPort,
    Reserved(u8),
}

impl DigitalInterface {
    fn from_nibble(n: u8) -> Self {
        match n {
            0 => Self::Undefined,
            1 => Self::Dvi,
            2 => Self::HdmiA,
            3 => Self::HdmiB,
            4 => Self::Mddi,
            5 => Self::DisplayPort,
            other => Self::Reserved(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "input", rename_all = "snake_case")]
pub enum VideoInput {
    Analog,
    /// 1.4 and later: bit depth and interface from byte 20.
    Digital {
        bit_depth: Option<u8>,
        interface: DigitalInterface,
    },
    /// Before 1.4 the only digital attribute is DFP 1.x compatibility.
    LegacyDigital { dfp1_compatible: bool },
}

impl VideoInput {
    fn decode(byte: u8, version: u16) -> Self {
        if byte & 0x80 == 0 {
            return VideoInput::Analog;
        }
        if version < VERSION_1_4 {
            return VideoInput::LegacyDigital {
                dfp1_compatible: byte & 0x01 != 0,
            };
        }
        let bit_depth = match (byte >> 4) & 0b111 {
            0 | 7 => None,
            n => Some(4 + 2 * n),
        };
        VideoInput::Digital {
            bit_depth,
            interface: DigitalInterface::from_nibble(byte & 0x0F),
        }
    }

    pub fn is_digital(&self) -> bool {
        !matches!(self, VideoInput::Analog)
    }
}

/// Analog display type, also used by pre-1.4 digital blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayType {
    Monochrome,
    RgbColor,
    NonRgbColor,
    Undefined,
}

/// Digital color encodings defined by EDID 1.4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorEncoding {
    Rgb444,
    Rgb444YCrCb444,
    Rgb444YCrCb422,
    Rgb444YCrCb444YCrCb422,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorFormat {
    DisplayType(DisplayType),
    Encoding(ColorEncoding),
}

impl ColorFormat {
    /// Selects the table by input type first, then by version.
    pub fn decode(index: u8, input: &VideoInput) -> Self {
        match input {
            VideoInput::Digital { .. } => ColorFormat::Encoding(match index & 0b11 {
                0 => ColorEncoding::Rgb444,
                1 => ColorEncoding::Rgb444YCrCb444,
                2 => ColorEncoding::Rgb444YCrCb422,
                _ => ColorEncoding::Rgb444YCrCb444YCrCb422,
            }),
            VideoInput::Analog | VideoInput::LegacyDigital { .. } => {
                ColorFormat::DisplayType(match index & 0b11 {
                    0 => DisplayType::Monochrome,
                    1 => DisplayType::RgbColor,
                    2 => DisplayType::NonRgbColor,
                    _ => DisplayType::Undefined,
                })
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorFormat::DisplayType(DisplayType::Monochrome) => "Monochrome/Grayscale",
            ColorFormat::DisplayType(DisplayType::RgbColor) => "RGB color",
            ColorFormat::DisplayType(DisplayType::NonRgbColor) => "Non-RGB color",
            ColorFormat::DisplayType(DisplayType::Undefined) => "Undefined",
            ColorFormat::Encoding(ColorEncoding::Rgb444) => "RGB 4:4:4",
            ColorFormat::Encoding(ColorEncoding::Rgb444YCrCb444) => "RGB 4:4:4 + YCrCb 4:4:4",
            ColorFormat::Encoding(ColorEncoding::Rgb444YCrCb422) => "RGB 4:4:4 + YCrCb 4:2:2",
            ColorFormat::Encoding(ColorEncoding::Rgb444YCrCb444YCrCb422) => {
                "RGB 4:4:4 + YCrCb 4:4:4 + YCrCb 4:2:2"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseBlock {
    pub header_valid: bool,
    pub manufacturer: String,
    pub product_code: u16,
    pub edid_version: u16,
    pub input: VideoInput,
    pub color_format_index: u8,
    pub color_format: ColorFormat,
    pub dpms: DpmsFlags,
    pub srgb: bool,
    pub preferred_timing_first: bool,
    pub continuous_timing_gtf_or_default: bool,
    pub descriptors: Vec<Descriptor>,
    pub extension_count: u8,
    pub checksum: ChecksumStatus,
}

impl BaseBlock {
    pub fn decode(b: &[u8; BLOCK_SIZE]) -> Self {
        let edid_version = u16::from_be_bytes([b[VERSION_OFFSET], b[VERSION_OFFSET + 1]]);
        let input = VideoInput::decode(b[INPUT_OFFSET], edid_version);
        let features = b[FEATURES_OFFSET];
        let color_format_index = (features & COLOR_FORMAT_MASK) >> 3;

        let descriptors = DESCRIPTOR_OFFSETS
            .iter()
            .filter_map(|&off| Descriptor::decode(&b[off..off + DESCRIPTOR_SIZE], off))
            .collect();

        let checksum = ChecksumStatus::of_block(b);
        if !checksum.valid {
            log::warn!(
                "Base block checksum mismatch: stored 0x{:02X}, computed 0x{:02X}",
                checksum.stored,
                checksum.computed
            );
        }

        Self {
            header_valid: b[..8] == HEADER,
            manufacturer: manufacturer_id(b[8], b[9]),
            product_code: u16::from_le_bytes([b[10], b[11]]),
            edid_version,
            input,
            color_format_index,
            color_format: ColorFormat::decode(color_format_index, &input),
            dpms: DpmsFlags::from_bits_truncate(features),
            srgb: features & SRGB_BIT != 0,
            preferred_timing_first: features & 0b10 != 0,
            continuous_timing_gtf_or_default: features & 0b1 != 0,
            descriptors,
            extension_count: b[EXTENSION_COUNT_OFFSET],
            checksum,
        }
    }

    pub fn is_digital(&self) -> bool {
        self.input.is_digital()
    }

    pub fn version_string(&self) -> String {
        format!("{}.{}", self.edid_version >> 8, self.edid_version & 0xFF)
    }
}

/// Three 5-bit letters packed big-endian, 'A' = 1.
fn manufacturer_id(hi: u8, lo: u8) -> String {
    let packed = u16::from_be_bytes([hi, lo]);
    [10u16, 5, 0]
        .iter()
        .map(|shift| {
            let v = ((packed >> shift) & 0x1F) as u8;
            if (1..=26).contains(&v) {
                (b'A' + v - 1) as char
            } else {
                '?'
            }
        })
        .collect()
}
