// Fri Oct 16 2026 - Alex

pub mod engine;
pub mod flag;
pub mod record;

pub use engine::{PatchEngine, PatchOutcome};
pub use flag::{OverrideFlag, OverrideSet};
pub use record::{Patch, PatchLocation, PatchSet};
