// Fri Oct 16 2026 - Alex

use crate::decode::base::{COLOR_FORMAT_MASK, FEATURES_OFFSET, SRGB_BIT, VERSION_OFFSET};
use crate::decode::cta::{DataBlockWalker, CTA_TAG, FEATURES_BYTE};
use crate::decode::vendor::Oui;
use crate::edid::{EdidBytes, EdidError, EdidResult, BLOCK_SIZE, CHECKSUM_OFFSET, EXTENSION_COUNT_OFFSET};
use crate::patch::{OverrideFlag, OverrideSet, Patch, PatchLocation, PatchSet};
use std::collections::BTreeSet;

const VSDB_TAG: u8 = 3;

/// Result of applying an override set to one EDID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub bytes: EdidBytes,
    pub patches: PatchSet,
    /// Flags that changed at least one byte.
    pub applied: Vec<OverrideFlag>,
    /// Flags skipped because they would have touched bytes outside the input.
    pub skipped: Vec<(OverrideFlag, EdidError)>,
}

impl PatchOutcome {
    /// Bytes to hand to persistence. When `NO_EXTENSIONS` changed anything
    /// and `full` is not set, the output stops after the base block.
    /// Otherwise every input byte is kept.
    pub fn output_bytes(&self, full: bool) -> &[u8] {
        let all = self.bytes.as_slice();
        if full || !self.applied.contains(&OverrideFlag::NoExtensions) {
            return all;
        }
        let declared = (1 + self.bytes.extension_count() as usize) * BLOCK_SIZE;
        &all[..declared.min(all.len())]
    }

    pub fn is_unchanged(&self) -> bool {
        self.patches.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PatchEngine {
    overrides: OverrideSet,
}

impl PatchEngine {
    pub fn new(overrides: OverrideSet) -> Self {
        Self { overrides }
    }

    pub fn overrides(&self) -> OverrideSet {
        self.overrides
    }

    /// Applies every enabled flag in evaluation order, then recomputes the
    /// checksum of each block that was touched.
    pub fn apply(&self, original: &EdidBytes) -> EdidResult<PatchOutcome> {
        let mut bytes = original.clone();
        let mut patches = PatchSet::new();
        let mut applied = Vec::new();
        let mut skipped = Vec::new();

        let cleared = self.overrides.cta_features_cleared();
        if !cleared.is_empty() {
            log::debug!("CTA feature bits to clear: {:?}", cleared);
        }

        for flag in self.overrides.flags() {
            match Self::step(&bytes, flag) {
                Ok((next, step_patches)) => {
                    if !step_patches.is_empty() {
                        log::info!("Applied {} ({} patch(es))", flag, step_patches.len());
                        applied.push(flag);
                    } else {
                        log::debug!("{} already satisfied", flag);
                    }
                    bytes = next;
                    patches.extend(step_patches);
                }
                Err(e) => {
                    log::warn!("Skipping {}: {}", flag, e);
                    skipped.push((flag, e));
                }
            }
        }

        for block in dirty_blocks(&patches, bytes.blocks_present()) {
            if let Some(value) = bytes.recompute_checksum(block)? {
                let offset = block * BLOCK_SIZE + CHECKSUM_OFFSET;
                log::debug!("Block {} checksum now 0x{:02X}", block, value);
                patches.insert(Patch::byte(offset, value));
            }
        }

        patches.refresh(&bytes)?;

        Ok(PatchOutcome {
            bytes,
            patches,
            applied,
            skipped,
        })
    }

    /// One override as a pure transition: the input is left untouched and
    /// the new bytes come back with exactly the patches that produced them.
    pub fn step(bytes: &EdidBytes, flag: OverrideFlag) -> EdidResult<(EdidBytes, Vec<Patch>)> {
        let mut work = bytes.clone();
        let patches = match flag {
            OverrideFlag::SetEdid14 => set_edid14(&mut work)?,
            OverrideFlag::SetRgb444 => clear_bits(&mut work, FEATURES_OFFSET, COLOR_FORMAT_MASK)?,
            OverrideFlag::NoSrgb => clear_bits(&mut work, FEATURES_OFFSET, SRGB_BIT)?,
            OverrideFlag::NoExtensions => no_extensions(&mut work)?,
            OverrideFlag::NoCtaVsdHdmi => zero_vendor_blocks(&mut work, Oui::HDMI_LICENSING)?,
            OverrideFlag::NoCtaVsdHdmiForum => zero_vendor_blocks(&mut work, Oui::HDMI_FORUM)?,
            OverrideFlag::NoCtaUnderscan
            | OverrideFlag::NoCtaYcbcr
            | OverrideFlag::NoCtaY444
            | OverrideFlag::NoCtaY422 => {
                let mask = flag.cta_feature_mask().unwrap_or_default();
                let mut out = Vec::new();
                for base in cta_block_offsets(&work) {
                    out.extend(clear_bits(&mut work, base + FEATURES_BYTE, mask.bits())?);
                }
                out
            }
        };
        Ok((work, patches))
    }
}

fn set_edid14(bytes: &mut EdidBytes) -> EdidResult<Vec<Patch>> {
    let target = [0x01, 0x04];
    if bytes.slice(VERSION_OFFSET, VERSION_OFFSET + 2)? == target {
        return Ok(Vec::new());
    }
    bytes.set(VERSION_OFFSET, target[0])?;
    bytes.set(VERSION_OFFSET + 1, target[1])?;
    Ok(vec![Patch::range(VERSION_OFFSET, target.to_vec())])
}

fn clear_bits(bytes: &mut EdidBytes, offset: usize, mask: u8) -> EdidResult<Vec<Patch>> {
    let current = bytes.get(offset)?;
    if current & mask == 0 {
        return Ok(Vec::new());
    }
    let value = current & !mask;
    bytes.set(offset, value)?;
    Ok(vec![Patch::byte(offset, value)])
}

fn no_extensions(bytes: &mut EdidBytes) -> EdidResult<Vec<Patch>> {
    let mut out = Vec::new();
    if bytes.get(EXTENSION_COUNT_OFFSET)? != 0 {
        bytes.set(EXTENSION_COUNT_OFFSET, 0)?;
        out.push(Patch::byte(EXTENSION_COUNT_OFFSET, 0));
    }
    let len = bytes.len();
    if len > BLOCK_SIZE && bytes.slice(BLOCK_SIZE, len)?.iter().any(|&b| b != 0) {
        bytes.fill(BLOCK_SIZE, len, 0)?;
        out.push(Patch::range(BLOCK_SIZE, vec![0; len - BLOCK_SIZE]));
    }
    Ok(out)
}

/// Zeroes the body (everything after the tag byte) of each vendor block
/// carrying `oui`.
fn zero_vendor_blocks(bytes: &mut EdidBytes, oui: Oui) -> EdidResult<Vec<Patch>> {
    let mut bodies = Vec::new();
    for base in cta_block_offsets(bytes) {
        let block: &[u8; BLOCK_SIZE] = bytes
            .block(base / BLOCK_SIZE)?
            .try_into()
            .map_err(|_| EdidError::out_of_bounds(base, bytes.len()))?;
        for span in DataBlockWalker::new(block) {
            if span.tag != VSDB_TAG || span.incomplete || span.length < 3 {
                continue;
            }
            let wire = [block[span.start + 1], block[span.start + 2], block[span.start + 3]];
            if Oui::from_wire(wire) == oui {
                bodies.push((base + span.start + 1, base + span.end));
            }
        }
    }

    let mut out = Vec::new();
    for (start, end) in bodies {
        bytes.fill(start, end, 0)?;
        out.push(Patch::range(start, vec![0; end - start]));
    }
    Ok(out)
}

/// Absolute offsets of CTA extension blocks within the declared count.
fn cta_block_offsets(bytes: &EdidBytes) -> Vec<usize> {
    let present = (bytes.extension_count() as usize).min(bytes.blocks_present() - 1);
    (1..=present)
        .map(|index| index * BLOCK_SIZE)
        .filter(|&base| bytes.get(base).map(|tag| tag == CTA_TAG).unwrap_or(false))
        .collect()
}

/// Complete blocks overlapped by any patch.
fn dirty_blocks(patches: &PatchSet, blocks_present: usize) -> BTreeSet<usize> {
    patches
        .locations()
        .filter(|loc| !loc.is_empty())
        .flat_map(|loc: &PatchLocation| loc.start() / BLOCK_SIZE..=(loc.end() - 1) / BLOCK_SIZE)
        .filter(|&block| block < blocks_present)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Edid;
    use crate::edid::{checksum, fixtures};

    fn engine(flags: &[OverrideFlag]) -> PatchEngine {
        PatchEngine::new(flags.iter().copied().collect())
    }

    fn bytes(data: Vec<u8>) -> EdidBytes {
        EdidBytes::new(data).unwrap()
    }

    #[test]
    fn test_no_overrides_is_identity() {
        let input = bytes(fixtures::two_block_edid());
        let out = PatchEngine::default().apply(&input).unwrap();
        assert_eq!(out.bytes, input);
        assert!(out.is_unchanged());
        assert_eq!(out.output_bytes(false), input.as_slice());
    }

    #[test]
    fn test_undeclared_trailing_block_kept_without_overrides() {
        let mut data = fixtures::base_block().to_vec();
        data.extend_from_slice(&fixtures::full_cta_block());
        let input = bytes(data);
        let out = PatchEngine::default().apply(&input).unwrap();
        assert_eq!(out.output_bytes(false), input.as_slice());

        let out = engine(&[OverrideFlag::SetRgb444]).apply(&input).unwrap();
        assert_eq!(out.output_bytes(false).len(), 256);
    }

    #[test]
    fn test_rgb444_and_srgb_scenario() {
        let input = bytes(fixtures::base_block_with(|b| b[24] = 0xFD).to_vec());
        let out = engine(&[OverrideFlag::SetRgb444, OverrideFlag::NoSrgb])
            .apply(&input)
            .unwrap();
        assert_eq!(out.bytes.get(24).unwrap(), 0xE1);
        let locations: Vec<_> = out.patches.locations().copied().collect();
        assert_eq!(
            locations,
            vec![PatchLocation::ByteAt(24), PatchLocation::ByteAt(127)]
        );
        assert_eq!(out.patches.get(&PatchLocation::ByteAt(24)), Some(&[0xE1][..]));
        assert!(checksum::verify(out.bytes.block(0).unwrap()));
    }

    #[test]
    fn test_rgb444_on_f8_clears_format_bits_only() {
        let input = bytes(fixtures::base_block_with(|b| b[24] = 0xF8).to_vec());
        let out = engine(&[OverrideFlag::SetRgb444, OverrideFlag::NoSrgb])
            .apply(&input)
            .unwrap();
        assert_eq!(out.bytes.get(24).unwrap(), 0xE0);
        assert_eq!(out.applied, vec![OverrideFlag::SetRgb444]);
        assert_eq!(out.bytes.get(24).unwrap() & 0b11000, 0);
    }

    #[test]
    fn test_set_edid14() {
        let input = bytes(fixtures::base_block_with(|b| b[19] = 0x03).to_vec());
        let out = engine(&[OverrideFlag::SetEdid14]).apply(&input).unwrap();
        assert_eq!(out.bytes.slice(18, 20).unwrap(), &[0x01, 0x04]);
        assert!(out.patches.contains(&PatchLocation::RangeAt { start: 18, end: 20 }));

        let already = bytes(fixtures::base_block().to_vec());
        let out = engine(&[OverrideFlag::SetEdid14]).apply(&already).unwrap();
        assert!(out.is_unchanged());
    }

    #[test]
    fn test_no_extensions() {
        let input = bytes(fixtures::two_block_edid());
        let out = engine(&[OverrideFlag::NoExtensions]).apply(&input).unwrap();
        assert_eq!(out.bytes.get(126).unwrap(), 0);
        assert!(out.bytes.as_slice()[128..].iter().all(|&b| b == 0));
        assert_eq!(out.output_bytes(false).len(), 128);
        assert_eq!(out.output_bytes(true).len(), 256);
        assert!(out.patches.contains(&PatchLocation::ByteAt(126)));
        assert!(out.patches.contains(&PatchLocation::RangeAt { start: 128, end: 256 }));
        assert!(checksum::verify(out.bytes.block(0).unwrap()));
        assert!(checksum::verify(out.bytes.block(1).unwrap()));
    }

    #[test]
    fn test_no_extensions_with_missing_blocks() {
        let input = bytes(fixtures::base_block_with(|b| b[126] = 2).to_vec());
        let out = engine(&[OverrideFlag::NoExtensions]).apply(&input).unwrap();
        assert_eq!(out.bytes.len(), 128);
        assert_eq!(out.bytes.get(126).unwrap(), 0);
        assert_eq!(out.patches.len(), 2);
    }

    #[test]
    fn test_cta_feature_flags() {
        let input = bytes(fixtures::two_block_edid());
        let out = engine(&[OverrideFlag::NoCtaUnderscan, OverrideFlag::NoCtaY444])
            .apply(&input)
            .unwrap();
        assert_eq!(out.bytes.get(131).unwrap() & 0xF0, 0x50);
        assert!(out.patches.contains(&PatchLocation::ByteAt(131)));
        assert!(out.patches.contains(&PatchLocation::ByteAt(255)));
        assert!(!out.patches.contains(&PatchLocation::ByteAt(127)));
        assert!(checksum::verify(out.bytes.block(1).unwrap()));
    }

    #[test]
    fn test_y422_alone_keeps_y444() {
        let input = bytes(fixtures::two_block_edid());
        let out = engine(&[OverrideFlag::NoCtaY422]).apply(&input).unwrap();
        let features = out.bytes.get(131).unwrap();
        assert_ne!(features & 0x20, 0);
        assert_eq!(features & 0x10, 0);
    }

    #[test]
    fn test_ycbcr_clears_both() {
        let input = bytes(fixtures::two_block_edid());
        let out = engine(&[OverrideFlag::NoCtaYcbcr]).apply(&input).unwrap();
        assert_eq!(out.bytes.get(131).unwrap() & 0x30, 0);
    }

    #[test]
    fn test_zero_hdmi_vendor_blocks() {
        let input = bytes(fixtures::two_block_edid());
        let out = engine(&[OverrideFlag::NoCtaVsdHdmi, OverrideFlag::NoCtaVsdHdmiForum])
            .apply(&input)
            .unwrap();
        // HDMI block body at 142..150, HDMI Forum body at 151..158.
        assert!(out.bytes.slice(142, 150).unwrap().iter().all(|&b| b == 0));
        assert!(out.bytes.slice(151, 158).unwrap().iter().all(|&b| b == 0));
        assert_eq!(out.bytes.get(141).unwrap(), 0x68);
        assert_eq!(out.bytes.get(150).unwrap(), 0x67);
        assert!(out.patches.contains(&PatchLocation::RangeAt { start: 142, end: 150 }));

        let edid = Edid::decode(&out.bytes).unwrap();
        let cta = edid.cta_extensions().next().unwrap();
        assert!(cta
            .vendor_blocks()
            .all(|v| v.oui() != Some(Oui::HDMI_LICENSING) && v.oui() != Some(Oui::HDMI_FORUM)));
        // Walk structure is unchanged.
        assert_eq!(cta.data_blocks.len(), 6);
    }

    #[test]
    fn test_second_pass_is_idempotent() {
        let all: Vec<_> = OverrideFlag::ALL.to_vec();
        let input = bytes(fixtures::two_block_edid());
        let first = engine(&all).apply(&input).unwrap();
        let second = engine(&all).apply(&first.bytes).unwrap();
        assert_eq!(second.bytes, first.bytes);
        assert!(second.patches.is_empty());

        let mut merged = first.patches.clone();
        merged.merge(&second.patches);
        assert_eq!(merged, first.patches);
    }

    #[test]
    fn test_cta_flags_after_no_extensions_do_nothing() {
        let input = bytes(fixtures::two_block_edid());
        let out = engine(&[OverrideFlag::NoExtensions, OverrideFlag::NoCtaYcbcr])
            .apply(&input)
            .unwrap();
        assert_eq!(out.applied, vec![OverrideFlag::NoExtensions]);
    }

    #[test]
    fn test_step_leaves_input_untouched() {
        let input = bytes(fixtures::base_block().to_vec());
        let (next, patches) = PatchEngine::step(&input, OverrideFlag::NoSrgb).unwrap();
        assert_eq!(input.get(24).unwrap(), 0x3E);
        assert_eq!(next.get(24).unwrap(), 0x3A);
        assert_eq!(patches, vec![Patch::byte(24, 0x3A)]);
    }

    #[test]
    fn test_checksum_mismatch_kept_when_block_untouched() {
        let mut data = fixtures::two_block_edid();
        data[255] ^= 0x01;
        let input = bytes(data);
        let out = engine(&[OverrideFlag::SetRgb444]).apply(&input).unwrap();
        assert_eq!(out.bytes.get(255).unwrap(), input.get(255).unwrap());
    }
}
