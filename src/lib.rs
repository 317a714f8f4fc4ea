// Thu Oct 15 2026 - Alex

pub mod config;
pub mod decode;
pub mod diff;
pub mod edid;
pub mod output;
pub mod patch;
pub mod pipeline;
pub mod ui;
pub mod utils;

pub use config::PatchConfig;
pub use decode::Edid;
pub use diff::{marker, ByteDiff};
pub use edid::{EdidBytes, EdidError, EdidResult};
pub use patch::{OverrideFlag, OverrideSet, Patch, PatchEngine, PatchLocation, PatchOutcome, PatchSet};
pub use pipeline::{process_display, BatchProcessor, BatchReport, DisplayIds, DisplayInput, DisplayReport};
