// Sat Oct 17 2026 - Alex

pub mod batch;
pub mod display;

pub use batch::{BatchProcessor, BatchReport, DisplayFailure};
pub use display::{process_display, DisplayIds, DisplayInput, DisplayReport, SkippedOverride};
