// Thu Oct 15 2026 - Alex

use crate::edid::{EdidError, EdidResult, BLOCK_SIZE, CHECKSUM_OFFSET};
use serde::Serialize;

/// Byte that brings the sum of `span` plus itself to zero mod 256.
pub fn checksum(span: &[u8]) -> u8 {
    let sum = span.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    0u8.wrapping_sub(sum)
}

pub fn verify(block: &[u8]) -> bool {
    block.len() == BLOCK_SIZE && block[CHECKSUM_OFFSET] == checksum(&block[..CHECKSUM_OFFSET])
}

/// Copy of `block` with byte 127 replaced by the computed checksum.
pub fn recomputed(block: &[u8]) -> EdidResult<[u8; BLOCK_SIZE]> {
    let mut out: [u8; BLOCK_SIZE] = block
        .try_into()
        .map_err(|_| EdidError::out_of_bounds(block.len().min(BLOCK_SIZE), block.len()))?;
    out[CHECKSUM_OFFSET] = checksum(&out[..CHECKSUM_OFFSET]);
    Ok(out)
}

/// Rewrites byte 127 in place. Returns the new value only if it changed.
pub fn recompute(block: &mut [u8]) -> EdidResult<Option<u8>> {
    if block.len() != BLOCK_SIZE {
        return Err(EdidError::out_of_bounds(CHECKSUM_OFFSET, block.len()));
    }
    let computed = checksum(&block[..CHECKSUM_OFFSET]);
    if block[CHECKSUM_OFFSET] == computed {
        return Ok(None);
    }
    block[CHECKSUM_OFFSET] = computed;
    Ok(Some(computed))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecksumStatus {
    pub stored: u8,
    pub computed: u8,
    pub valid: bool,
}

impl ChecksumStatus {
    pub fn of(block: &[u8]) -> Option<Self> {
        let block: &[u8; BLOCK_SIZE] = block.try_into().ok()?;
        Some(Self::of_block(block))
    }

    pub fn of_block(block: &[u8; BLOCK_SIZE]) -> Self {
        let stored = block[CHECKSUM_OFFSET];
        let computed = checksum(&block[..CHECKSUM_OFFSET]);
        Self {
            stored,
            computed,
            valid: stored == computed,
        }
    }
}
