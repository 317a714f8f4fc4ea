// Fri Oct 16 2026 - Alex

use std::fmt;

/// Byte-level diff between an original and a patched EDID.
#[derive(Debug, Clone, Default)]
pub struct ByteDiff {
    pub regions: Vec<DiffRegion>,
    pub stats: DiffStats,
}

impl ByteDiff {
    /// Changed runs in the common prefix, then one added or removed tail.
    pub fn between(old_data: &[u8], new_data: &[u8]) -> Self {
        let mut diff = Self::default();

        let min_len = old_data.len().min(new_data.len());
        let mut region_start: Option<usize> = None;

        for i in 0..min_len {
            if old_data[i] != new_data[i] {
                if region_start.is_none() {
                    region_start = Some(i);
                }
            } else if let Some(start) = region_start.take() {
                diff.regions.push(DiffRegion::modified(start, i - start));
            }
        }

        if let Some(start) = region_start {
            diff.regions.push(DiffRegion::modified(start, min_len - start));
        }

        if new_data.len() > old_data.len() {
            diff.regions
                .push(DiffRegion::added(old_data.len(), new_data.len() - old_data.len()));
        } else if old_data.len() > new_data.len() {
            diff.regions
                .push(DiffRegion::removed(new_data.len(), old_data.len() - new_data.len()));
        }

        diff.stats.old_size = old_data.len();
        diff.stats.new_size = new_data.len();
        diff.stats.changed_bytes = diff.regions.iter().map(|r| r.size).sum();
        diff
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn touches(&self, offset: usize) -> bool {
        self.regions.iter().any(|r| r.contains(offset))
    }
}

impl fmt::Display for ByteDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} changed region(s)", self.regions.len())?;
        for region in &self.regions {
            writeln!(f, "  {}", region)?;
        }
        write!(f, "{}", self.stats)
    }
}

/// Half-open run `start..start + size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffRegion {
    pub start: usize,
    pub size: usize,
    pub kind: RegionKind,
}

impl DiffRegion {
    pub fn modified(start: usize, size: usize) -> Self {
        Self { start, size, kind: RegionKind::Modified }
    }

    pub fn added(start: usize, size: usize) -> Self {
        Self { start, size, kind: RegionKind::Added }
    }

    pub fn removed(start: usize, size: usize) -> Self {
        Self { start, size, kind: RegionKind::Removed }
    }

    pub fn end(&self) -> usize {
        self.start + self.size
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }
}

impl fmt::Display for DiffRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: 0x{:02X}..0x{:02X} ({} bytes)", self.kind, self.start, self.end(), self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Modified,
    /// Present only in the new data
    Added,
    /// Present only in the old data
    Removed,
}

#[derive(Debug, Clone, Default)]
pub struct DiffStats {
    pub old_size: usize,
    pub new_size: usize,
    pub changed_bytes: usize,
}

impl DiffStats {
    pub fn size_delta(&self) -> i64 {
        self.new_size as i64 - self.old_size as i64
    }
}

impl fmt::Display for DiffStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  {} -> {} bytes ({:+}), {} touched",
            self.old_size,
            self.new_size,
            self.size_delta(),
            self.changed_bytes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_diff_regions() {
        let old = vec![0x00, 0x01, 0x02, 0x03, 0x04];
        let new = vec![0x00, 0xFF, 0xFE, 0x03, 0x05];

        let diff = ByteDiff::between(&old, &new);
        assert_eq!(
            diff.regions,
            vec![DiffRegion::modified(1, 2), DiffRegion::modified(4, 1)]
        );
        assert_eq!(diff.stats.changed_bytes, 3);
        assert!(diff.touches(2));
        assert!(!diff.touches(3));
    }

    #[test]
    fn test_truncation_is_a_removed_tail() {
        let old = vec![0u8; 256];
        let new = vec![0u8; 128];
        let diff = ByteDiff::between(&old, &new);
        assert_eq!(diff.regions, vec![DiffRegion::removed(128, 128)]);
        assert_eq!(diff.stats.size_delta(), -128);
    }

    #[test]
    fn test_identical_inputs() {
        let data = vec![1, 2, 3];
        assert!(ByteDiff::between(&data, &data).is_empty());
    }
}
