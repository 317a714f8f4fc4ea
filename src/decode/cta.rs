// Fri Oct 16 2026 - Alex

use crate::decode::descriptor::{Descriptor, DESCRIPTOR_SIZE};
use crate::decode::vendor::VendorBlock;
use crate::edid::{BLOCK_SIZE, CHECKSUM_OFFSET};
use bitflags::bitflags;
use serde::Serialize;

pub const CTA_TAG: u8 = 0x02;
pub const DTD_OFFSET_BYTE: usize = 2;
pub const FEATURES_BYTE: usize = 3;
pub const DATA_BLOCKS_START: usize = 4;

bitflags! {
    /// Byte 3 of a CTA extension, upper nibble.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct CtaFeatures: u8 {
        const UNDERSCAN = 0x80;
        const BASIC_AUDIO = 0x40;
        const YCBCR_444 = 0x20;
        const YCBCR_422 = 0x10;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShortVideoDescriptor {
    pub vic: u8,
    pub native: bool,
}

impl ShortVideoDescriptor {
    fn from_byte(b: u8) -> Self {
        // Codes 129..=192 mark native VICs 1..=64; 193 and up are plain 8-bit VICs.
        if (129..=192).contains(&b) {
            Self { vic: b & 0x7F, native: true }
        } else {
            Self { vic: b, native: false }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CtaBlockKind {
    Audio { descriptors: Vec<[u8; 3]> },
    Video { svds: Vec<ShortVideoDescriptor> },
    VendorSpecific(VendorBlock),
    SpeakerAllocation { payload: Vec<u8> },
    VesaDtc { payload: Vec<u8> },
    Extended { extended_tag: Option<u8>, payload: Vec<u8> },
    Reserved { tag: u8, payload: Vec<u8> },
}

impl CtaBlockKind {
    /// `block` starts at the tag byte.
    fn decode(tag: u8, block: &[u8]) -> Self {
        let payload = block.get(1..).unwrap_or_default();
        match tag {
            1 => CtaBlockKind::Audio {
                descriptors: payload
                    .chunks_exact(3)
                    .map(|c| [c[0], c[1], c[2]])
                    .collect(),
            },
            2 => CtaBlockKind::Video {
                svds: payload
                    .iter()
                    .map(|&b| ShortVideoDescriptor::from_byte(b))
                    .collect(),
            },
            3 => CtaBlockKind::VendorSpecific(VendorBlock::decode(block)),
            4 => CtaBlockKind::SpeakerAllocation {
                payload: payload.to_vec(),
            },
            5 => CtaBlockKind::VesaDtc {
                payload: payload.to_vec(),
            },
            7 => CtaBlockKind::Extended {
                extended_tag: payload.first().copied(),
                payload: payload.get(1..).unwrap_or_default().to_vec(),
            },
            other => CtaBlockKind::Reserved {
                tag: other,
                payload: payload.to_vec(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CtaDataBlock {
    /// Absolute offset of the tag byte.
    pub offset: usize,
    pub tag: u8,
    pub length: u8,
    pub kind: CtaBlockKind,
    pub incomplete: bool,
}

impl CtaDataBlock {
    pub fn vendor(&self) -> Option<&VendorBlock> {
        match &self.kind {
            CtaBlockKind::VendorSpecific(v) => Some(v),
            _ => None,
        }
    }
}

/// Position of one data block inside its extension block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    /// Relative to the extension block.
    pub start: usize,
    pub tag: u8,
    pub length: u8,
    /// Exclusive end, clipped to the data-block region.
    pub end: usize,
    pub incomplete: bool,
}

/// Iterates the length-prefixed data blocks in `4..dtd_offset`.
pub struct DataBlockWalker<'a> {
    block: &'a [u8; BLOCK_SIZE],
    cursor: usize,
    limit: usize,
}

impl<'a> DataBlockWalker<'a> {
    pub fn new(block: &'a [u8; BLOCK_SIZE]) -> Self {
        let dtd_offset = block[DTD_OFFSET_BYTE] as usize;
        Self {
            block,
            cursor: DATA_BLOCKS_START,
            limit: region_end(dtd_offset),
        }
    }
}

impl Iterator for DataBlockWalker<'_> {
    type Item = BlockSpan;

    fn next(&mut self) -> Option<BlockSpan> {
        if self.cursor >= self.limit {
            return None;
        }
        let start = self.cursor;
        let header = self.block[start];
        let tag = (header >> 5) & 0b111;
        let length = header & 0b1_1111;
        let declared_end = start + 1 + length as usize;
        let incomplete = declared_end > self.limit;
        let end = declared_end.min(self.limit);
        // An overrun ends the walk.
        self.cursor = if incomplete { self.limit } else { end };
        Some(BlockSpan {
            start,
            tag,
            length,
            end,
            incomplete,
        })
    }
}

/// End of the data-block region for a given `dtd_offset`. Offsets of 4 or
/// less mean the extension carries no data blocks.
fn region_end(dtd_offset: usize) -> usize {
    if dtd_offset <= DATA_BLOCKS_START {
        DATA_BLOCKS_START
    } else {
        dtd_offset.min(CHECKSUM_OFFSET)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CtaExtension {
    pub revision: u8,
    pub dtd_offset: u8,
    pub native_dtd_count: u8,
    pub features: CtaFeatures,
    pub data_blocks: Vec<CtaDataBlock>,
    pub descriptors: Vec<Descriptor>,
    pub incomplete: bool,
}

impl CtaExtension {
    /// `base` is the absolute offset of `block` in the whole EDID.
    pub fn decode(block: &[u8; BLOCK_SIZE], base: usize) -> Self {
        let dtd_offset = block[DTD_OFFSET_BYTE];
        let flags = block[FEATURES_BYTE];
        let mut incomplete = dtd_offset as usize > CHECKSUM_OFFSET;

        let mut data_blocks = Vec::new();
        for span in DataBlockWalker::new(block) {
            if span.incomplete {
                log::warn!(
                    "CTA data block at 0x{:X} declares {} bytes past the DTD offset",
                    base + span.start,
                    span.start + 1 + span.length as usize - span.end
                );
                incomplete = true;
            }
            let kind = CtaBlockKind::decode(span.tag, &block[span.start..span.end]);
            log::debug!(
                "CTA data block at 0x{:X}: tag {} length {}",
                base + span.start,
                span.tag,
                span.length
            );
            data_blocks.push(CtaDataBlock {
                offset: base + span.start,
                tag: span.tag,
                length: span.length,
                kind,
                incomplete: span.incomplete,
            });
        }

        Self {
            revision: block[1],
            dtd_offset,
            native_dtd_count: flags & 0x0F,
            features: CtaFeatures::from_bits_truncate(flags),
            data_blocks,
            descriptors: decode_dtds(block, dtd_offset as usize, base),
            incomplete,
        }
    }

    pub fn vendor_blocks(&self) -> impl Iterator<Item = &VendorBlock> {
        self.data_blocks.iter().filter_map(|b| b.vendor())
    }
}

/// 18-byte DTD slots from `dtd_offset` up to the checksum, stopping at the
/// first slot whose pixel clock bytes are both zero.
fn decode_dtds(block: &[u8; BLOCK_SIZE], dtd_offset: usize, base: usize) -> Vec<Descriptor> {
    let mut out = Vec::new();
    if dtd_offset < DATA_BLOCKS_START {
        return out;
    }
    let mut pos = dtd_offset;
    while pos + DESCRIPTOR_SIZE <= CHECKSUM_OFFSET {
        let slot = &block[pos..pos + DESCRIPTOR_SIZE];
        if slot[0] == 0 && slot[1] == 0 {
            break;
        }
        if let Some(d) = Descriptor::decode(slot, base + pos) {
            out.push(d);
        }
        pos += DESCRIPTOR_SIZE;
    }
    out
}
