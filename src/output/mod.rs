// Sat Oct 17 2026 - Alex

pub mod formatter;
pub mod json;

pub use formatter::ReportFormatter;
pub use json::{JsonError, ReportSerializer};
