// Fri Oct 16 2026 - Alex

pub mod base;
pub mod cta;
pub mod descriptor;
pub mod extension;
pub mod vendor;

pub use base::{BaseBlock, ColorEncoding, ColorFormat, DisplayType, DpmsFlags, VideoInput};
pub use cta::{CtaBlockKind, CtaDataBlock, CtaExtension, CtaFeatures, DataBlockWalker};
pub use descriptor::{Descriptor, DetailedTiming, MonitorDescriptor, MonitorDescriptorKind};
pub use extension::{Extension, ExtensionBody, ExtensionKind};
pub use vendor::{HdmiForumVsdb, HdmiVsdb, Oui, VendorBlock};

use crate::edid::{EdidBytes, EdidError, EdidResult, BLOCK_SIZE};
use serde::Serialize;

/// Read-only structural summary of one EDID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edid {
    pub base: BaseBlock,
    pub extensions: Vec<Extension>,
    /// The base block declares more extensions than the input carries.
    pub extensions_truncated: bool,
    pub byte_len: usize,
}

impl Edid {
    pub fn decode(bytes: &EdidBytes) -> EdidResult<Self> {
        let base = BaseBlock::decode(block_array(bytes, 0)?);

        let declared = base.extension_count as usize;
        let available = bytes.blocks_present() - 1;
        let present = declared.min(available);
        let extensions_truncated = declared > available;
        if extensions_truncated {
            log::warn!(
                "Base block declares {} extension(s) but only {} present",
                declared,
                available
            );
        }

        let extensions = (1..=present)
            .map(|index| block_array(bytes, index).map(|block| Extension::decode(block, index)))
            .collect::<EdidResult<Vec<_>>>()?;

        Ok(Self {
            base,
            extensions,
            extensions_truncated,
            byte_len: bytes.len(),
        })
    }

    pub fn from_hex(hex: &str) -> EdidResult<(Self, EdidBytes)> {
        let bytes = EdidBytes::from_hex(hex)?;
        let edid = Self::decode(&bytes)?;
        Ok((edid, bytes))
    }

    pub fn display_name(&self) -> Option<&str> {
        self.base
            .descriptors
            .iter()
            .filter_map(Descriptor::as_monitor)
            .find(|m| m.kind == MonitorDescriptorKind::DisplayName)
            .and_then(|m| m.text.as_deref())
    }

    pub fn serial_number(&self) -> Option<&str> {
        self.base
            .descriptors
            .iter()
            .filter_map(Descriptor::as_monitor)
            .find(|m| m.kind == MonitorDescriptorKind::SerialNumber)
            .and_then(|m| m.text.as_deref())
    }

    pub fn cta_extensions(&self) -> impl Iterator<Item = &CtaExtension> {
        self.extensions.iter().filter_map(Extension::as_cta)
    }

    /// Block indices (0 = base) whose stored checksum is wrong.
    pub fn checksum_mismatches(&self) -> Vec<usize> {
        let base = (!self.base.checksum.valid).then_some(0);
        base.into_iter()
            .chain(
                self.extensions
                    .iter()
                    .filter(|e| !e.checksum.valid)
                    .map(|e| e.index),
            )
            .collect()
    }

    pub fn is_incomplete(&self) -> bool {
        self.extensions_truncated || self.extensions.iter().any(Extension::is_incomplete)
    }
}

fn block_array(bytes: &EdidBytes, index: usize) -> EdidResult<&[u8; BLOCK_SIZE]> {
    let block = bytes.block(index)?;
    block
        .try_into()
        .map_err(|_| EdidError::out_of_bounds(index * BLOCK_SIZE, bytes.len()))
}
