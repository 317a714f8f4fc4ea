// Sat Oct 17 2026 - Alex

use serde::Serialize;
use serde_json::{to_string, to_string_pretty, to_writer, to_writer_pretty};
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Renders reports for downstream persistence tooling.
#[derive(Debug, Clone, Copy)]
pub struct ReportSerializer {
    pretty_print: bool,
    trailing_newline: bool,
}

impl ReportSerializer {
    pub fn new() -> Self {
        Self {
            pretty_print: true,
            trailing_newline: true,
        }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn with_trailing_newline(mut self, newline: bool) -> Self {
        self.trailing_newline = newline;
        self
    }

    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, JsonError> {
        let mut out = if self.pretty_print {
            to_string_pretty(value)?
        } else {
            to_string(value)?
        };
        if self.trailing_newline {
            out.push('\n');
        }
        Ok(out)
    }

    pub fn write<T: Serialize + ?Sized, W: Write>(&self, value: &T, mut writer: W) -> Result<(), JsonError> {
        if self.pretty_print {
            to_writer_pretty(&mut writer, value)?;
        } else {
            to_writer(&mut writer, value)?;
        }
        if self.trailing_newline {
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Default for ReportSerializer {
    fn default() -> Self {
        Self::new()
    }
}
