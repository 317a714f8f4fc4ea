// Fri Oct 16 2026 - Alex

use crate::edid::{hex, EdidBytes, EdidResult};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Where a patch applies. Ranges are half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PatchLocation {
    #[serde(rename = "offset")]
    ByteAt(usize),
    #[serde(rename = "range")]
    RangeAt { start: usize, end: usize },
}

impl PatchLocation {
    pub fn start(&self) -> usize {
        match *self {
            PatchLocation::ByteAt(offset) => offset,
            PatchLocation::RangeAt { start, .. } => start,
        }
    }

    pub fn end(&self) -> usize {
        match *self {
            PatchLocation::ByteAt(offset) => offset + 1,
            PatchLocation::RangeAt { end, .. } => end,
        }
    }

    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for PatchLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchLocation::ByteAt(offset) => write!(f, "0x{:02X}", offset),
            PatchLocation::RangeAt { start, end } => write!(f, "0x{:02X}..0x{:02X}", start, end),
        }
    }
}

/// A location together with the bytes it holds after patching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Patch {
    #[serde(flatten)]
    pub location: PatchLocation,
    pub values: Vec<u8>,
}

impl Patch {
    pub fn byte(offset: usize, value: u8) -> Self {
        Self {
            location: PatchLocation::ByteAt(offset),
            values: vec![value],
        }
    }

    pub fn range(start: usize, values: Vec<u8>) -> Self {
        Self {
            location: PatchLocation::RangeAt {
                start,
                end: start + values.len(),
            },
            values,
        }
    }

    /// Reads the current bytes for `location` from `bytes`.
    pub fn capture(location: PatchLocation, bytes: &EdidBytes) -> EdidResult<Self> {
        Ok(Self {
            location,
            values: bytes.slice(location.start(), location.end())?.to_vec(),
        })
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.location, hex::encode(&self.values))
    }
}

/// Patches keyed by location, in first-touch order. Re-inserting a location
/// keeps its position and takes the newer values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchSet {
    entries: IndexMap<PatchLocation, Vec<u8>>,
}

impl PatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, patch: Patch) {
        log::trace!("patch {}", patch);
        self.entries.insert(patch.location, patch.values);
    }

    pub fn extend<I: IntoIterator<Item = Patch>>(&mut self, patches: I) {
        for patch in patches {
            self.insert(patch);
        }
    }

    pub fn merge(&mut self, other: &PatchSet) {
        self.extend(other.iter());
    }

    /// Re-reads every entry from `bytes` so overlapping patches agree on
    /// the final values.
    pub fn refresh(&mut self, bytes: &EdidBytes) -> EdidResult<()> {
        for (location, values) in self.entries.iter_mut() {
            *values = bytes.slice(location.start(), location.end())?.to_vec();
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, location: &PatchLocation) -> bool {
        self.entries.contains_key(location)
    }

    pub fn get(&self, location: &PatchLocation) -> Option<&[u8]> {
        self.entries.get(location).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = Patch> + '_ {
        self.entries.iter().map(|(location, values)| Patch {
            location: *location,
            values: values.clone(),
        })
    }

    pub fn locations(&self) -> impl Iterator<Item = &PatchLocation> {
        self.entries.keys()
    }

    pub fn to_vec(&self) -> Vec<Patch> {
        self.iter().collect()
    }
}

impl FromIterator<Patch> for PatchSet {
    fn from_iter<I: IntoIterator<Item = Patch>>(iter: I) -> Self {
        let mut set = PatchSet::new();
        set.extend(iter);
        set
    }
}

impl Serialize for PatchSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edid::fixtures;

    #[test]
    fn test_duplicate_locations_collapse() {
        let mut set = PatchSet::new();
        set.insert(Patch::byte(24, 0xE8));
        set.insert(Patch::byte(126, 0x00));
        set.insert(Patch::byte(24, 0xE0));
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(&PatchLocation::ByteAt(24)), Some(&[0xE0][..]));
        let first = set.locations().next().copied();
        assert_eq!(first, Some(PatchLocation::ByteAt(24)));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let set: PatchSet = vec![Patch::byte(24, 0xE0), Patch::range(128, vec![0; 4])]
            .into_iter()
            .collect();
        let mut merged = set.clone();
        merged.merge(&set);
        assert_eq!(merged, set);
    }

    #[test]
    fn test_range_location() {
        let patch = Patch::range(18, vec![0x01, 0x04]);
        assert_eq!(patch.location, PatchLocation::RangeAt { start: 18, end: 20 });
        assert_eq!(patch.location.len(), 2);
        assert_eq!(patch.to_string(), "0x12..0x14 = 0104");
    }

    #[test]
    fn test_refresh_reads_final_values() {
        let mut bytes = EdidBytes::new(fixtures::base_block().to_vec()).unwrap();
        let mut set = PatchSet::new();
        set.insert(Patch::byte(24, 0x00));
        bytes.set(24, 0x21).unwrap();
        set.refresh(&bytes).unwrap();
        assert_eq!(set.get(&PatchLocation::ByteAt(24)), Some(&[0x21][..]));
    }

    #[test]
    fn test_capture_out_of_range() {
        let bytes = EdidBytes::new(fixtures::base_block().to_vec()).unwrap();
        assert!(Patch::capture(PatchLocation::ByteAt(128), &bytes).is_err());
        let p = Patch::capture(PatchLocation::RangeAt { start: 0, end: 2 }, &bytes).unwrap();
        assert_eq!(p.values, vec![0x00, 0xFF]);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Patch::byte(24, 0xE0)).unwrap();
        assert_eq!(json, serde_json::json!({"offset": 24, "values": [224]}));
        let json = serde_json::to_value(Patch::range(18, vec![1, 4])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"range": {"start": 18, "end": 20}, "values": [1, 4]})
        );
    }
}
