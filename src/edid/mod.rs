// Thu Oct 15 2026 - Alex

pub mod buffer;
pub mod checksum;
pub mod error;
pub mod hex;

#[cfg(test)]
pub(crate) mod fixtures;

pub use buffer::EdidBytes;
pub use checksum::ChecksumStatus;
pub use error::{EdidError, EdidResult};

pub const BLOCK_SIZE: usize = 128;
pub const CHECKSUM_OFFSET: usize = 127;
pub const EXTENSION_COUNT_OFFSET: usize = 126;
pub const HEADER: [u8; 8] = [0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];
