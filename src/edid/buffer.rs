// Thu Oct 15 2026 - Alex

use crate::edid::{checksum, hex, ChecksumStatus, EdidError, EdidResult, BLOCK_SIZE, EXTENSION_COUNT_OFFSET};
use std::fmt;

/// Raw EDID bytes: the base block followed by whatever extension blocks
/// were supplied. All access is bounds-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdidBytes {
    data: Vec<u8>,
}

impl EdidBytes {
    pub fn new(data: Vec<u8>) -> EdidResult<Self> {
        if data.len() < BLOCK_SIZE {
            return Err(EdidError::malformed(format!(
                "EDID needs at least {} bytes, got {}",
                BLOCK_SIZE,
                data.len()
            )));
        }
        Ok(Self { data })
    }

    pub fn from_hex(s: &str) -> EdidResult<Self> {
        Self::new(hex::decode(s)?)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, offset: usize) -> EdidResult<u8> {
        self.data
            .get(offset)
            .copied()
            .ok_or_else(|| EdidError::out_of_bounds(offset, self.data.len()))
    }

    /// Bytes in `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> EdidResult<&[u8]> {
        if start > end {
            return Err(EdidError::out_of_bounds(start, end));
        }
        self.data
            .get(start..end)
            .ok_or_else(|| EdidError::out_of_bounds(end.saturating_sub(1), self.data.len()))
    }

    pub fn set(&mut self, offset: usize, value: u8) -> EdidResult<()> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(offset)
            .ok_or_else(|| EdidError::out_of_bounds(offset, len))?;
        *slot = value;
        Ok(())
    }

    pub fn fill(&mut self, start: usize, end: usize, value: u8) -> EdidResult<()> {
        let len = self.data.len();
        if start > end || end > len {
            return Err(EdidError::out_of_bounds(end.saturating_sub(1), len));
        }
        self.data[start..end].iter_mut().for_each(|b| *b = value);
        Ok(())
    }

    /// Declared extension count from byte 126.
    pub fn extension_count(&self) -> u8 {
        self.data[EXTENSION_COUNT_OFFSET]
    }

    /// Complete 128-byte blocks actually present, base block included.
    pub fn blocks_present(&self) -> usize {
        self.data.len() / BLOCK_SIZE
    }

    pub fn block(&self, index: usize) -> EdidResult<&[u8]> {
        let start = index * BLOCK_SIZE;
        self.slice(start, start + BLOCK_SIZE)
    }

    pub fn block_mut(&mut self, index: usize) -> EdidResult<&mut [u8]> {
        let start = index * BLOCK_SIZE;
        let len = self.data.len();
        self.data
            .get_mut(start..start + BLOCK_SIZE)
            .ok_or_else(|| EdidError::out_of_bounds(start + BLOCK_SIZE - 1, len))
    }

    pub fn checksum_status(&self, index: usize) -> Option<ChecksumStatus> {
        self.block(index).ok().and_then(ChecksumStatus::of)
    }

    /// Recomputes one block's checksum, returning the new byte if it changed.
    pub fn recompute_checksum(&mut self, index: usize) -> EdidResult<Option<u8>> {
        checksum::recompute(self.block_mut(index)?)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.data)
    }
}

impl AsRef<[u8]> for EdidBytes {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for EdidBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edid::fixtures;

    #[test]
    fn test_get_and_set_in_range() {
        let mut bytes = EdidBytes::new(fixtures::base_block().to_vec()).unwrap();
        bytes.set(24, 0x42).unwrap();
        assert_eq!(bytes.get(24).unwrap(), 0x42);
    }

    #[test]
    fn test_out_of_range_access_fails() {
        let mut bytes = EdidBytes::new(fixtures::base_block().to_vec()).unwrap();
        assert_eq!(bytes.get(128), Err(EdidError::out_of_bounds(128, 128)));
        assert!(bytes.set(200, 0).is_err());
        assert!(bytes.slice(120, 130).is_err());
        assert!(bytes.slice(10, 5).is_err());
        assert!(bytes.block(1).is_err());
        assert!(bytes.fill(100, 129, 0).is_err());
    }

    #[test]
    fn test_slice_bounds() {
        let bytes = EdidBytes::new(fixtures::base_block().to_vec()).unwrap();
        assert_eq!(bytes.slice(0, 8).unwrap(), &crate::edid::HEADER);
        assert!(bytes.slice(128, 128).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_short_input() {
        assert!(EdidBytes::new(vec![0; 127]).unwrap_err().is_malformed());
    }

    #[test]
    fn test_blocks_present_ignores_partial_tail() {
        let mut data = fixtures::base_block().to_vec();
        data.extend_from_slice(&[0u8; 64]);
        let bytes = EdidBytes::new(data).unwrap();
        assert_eq!(bytes.blocks_present(), 1);
    }

    #[test]
    fn test_hex_roundtrip_preserves_bytes() {
        let original = fixtures::two_block_edid();
        let bytes = EdidBytes::new(original.clone()).unwrap();
        let again = EdidBytes::from_hex(&bytes.to_hex()).unwrap();
        assert_eq!(again.as_slice(), original.as_slice());
    }
}
