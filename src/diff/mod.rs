// Fri Oct 16 2026 - Alex

pub mod binary;
pub mod marker;

pub use binary::{ByteDiff, DiffRegion, DiffStats, RegionKind};
pub use marker::marker;
