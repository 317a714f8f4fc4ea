// Fri Oct 16 2026 - Alex

use crate::decode::cta::{CtaExtension, CTA_TAG};
use crate::edid::{ChecksumStatus, BLOCK_SIZE};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionKind {
    Timing,
    LcdTimings,
    Cta,
    VideoTiming,
    Edid20,
    ColorInfo,
    DiExt,
    LsExt,
    MiExt,
    DisplayId,
    Dtcdb,
    BlockMap,
    ManufacturerDefined,
    Undefined(u8),
}

impl ExtensionKind {
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            0x00 => Self::Timing,
            0x01 => Self::LcdTimings,
            CTA_TAG => Self::Cta,
            0x10 => Self::VideoTiming,
            0x20 => Self::Edid20,
            0x30 => Self::ColorInfo,
            0x40 => Self::DiExt,
            0x50 => Self::LsExt,
            0x60 => Self::MiExt,
            0x70 => Self::DisplayId,
            0xA7 | 0xAF | 0xBF => Self::Dtcdb,
            0xF0 => Self::BlockMap,
            0xFF => Self::ManufacturerDefined,
            other => Self::Undefined(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timing => "Timing Extension",
            Self::LcdTimings => "LCD Timings",
            Self::Cta => "CTA/CEA-861",
            Self::VideoTiming => "Video Timing Block",
            Self::Edid20 => "EDID 2.0",
            Self::ColorInfo => "Color Information",
            Self::DiExt => "DI-EXT",
            Self::LsExt => "LS-EXT",
            Self::MiExt => "MI-EXT",
            Self::DisplayId => "DisplayID",
            Self::Dtcdb => "Display Transfer Characteristics",
            Self::BlockMap => "Block Map",
            Self::ManufacturerDefined => "Manufacturer Defined",
            Self::Undefined(_) => "Undefined",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionBody {
    Cta(CtaExtension),
    Raw(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extension {
    /// 1-based block index.
    pub index: usize,
    pub offset: usize,
    pub tag: u8,
    pub kind: ExtensionKind,
    pub body: ExtensionBody,
    pub checksum: ChecksumStatus,
}

impl Extension {
    pub fn decode(block: &[u8; BLOCK_SIZE], index: usize) -> Self {
        let offset = index * BLOCK_SIZE;
        let tag = block[0];
        let kind = ExtensionKind::from_tag(tag);
        log::debug!("Extension block {} at 0x{:X}: {} (0x{:02X})", index, offset, kind.as_str(), tag);

        let body = match kind {
            ExtensionKind::Cta => ExtensionBody::Cta(CtaExtension::decode(block, offset)),
            _ => ExtensionBody::Raw(block.to_vec()),
        };

        let checksum = ChecksumStatus::of_block(block);
        if !checksum.valid {
            log::warn!(
                "Extension block {} checksum mismatch: stored 0x{:02X}, computed 0x{:02X}",
                index,
                checksum.stored,
                checksum.computed
            );
        }

        Self {
            index,
            offset,
            tag,
            kind,
            body,
            checksum,
        }
    }

    pub fn as_cta(&self) -> Option<&CtaExtension> {
        match &self.body {
            ExtensionBody::Cta(cta) => Some(cta),
            ExtensionBody::Raw(_) => None,
        }
    }

    pub fn is_incomplete(&self) -> bool {
        self.as_cta().map(|c| c.incomplete).unwrap_or(false)
    }
}
