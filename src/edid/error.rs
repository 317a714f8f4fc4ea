// Thu Oct 15 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EdidError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("Out of bounds: offset {offset} not in 0..{len}")]
    OutOfBounds { offset: usize, len: usize },
}

impl EdidError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        EdidError::MalformedInput(msg.into())
    }

    pub fn out_of_bounds(offset: usize, len: usize) -> Self {
        EdidError::OutOfBounds { offset, len }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, EdidError::MalformedInput(_))
    }
}

pub type EdidResult<T> = Result<T, EdidError>;
