// Thu Oct 15 2026 - Alex

use crate::edid::checksum::checksum;
use crate::edid::{BLOCK_SIZE, CHECKSUM_OFFSET, EXTENSION_COUNT_OFFSET, HEADER};

pub const DTD_1080P: [u8; 18] = [
    0x02, 0x3A, 0x80, 0x18, 0x71, 0x38, 0x2D, 0x40, 0x58, 0x2C, 0x45, 0x00, 0x56, 0x50, 0x21,
    0x00, 0x00, 0x1E,
];

pub const RANGE_LIMITS: [u8; 18] = [
    0x00, 0x00, 0x00, 0xFD, 0x00, 0x38, 0x4C, 0x1E, 0x53, 0x11, 0x00, 0x0A, 0x20, 0x20, 0x20,
    0x20, 0x20, 0x20,
];

pub const NAME_TESTMON: [u8; 18] = [
    0x00, 0x00, 0x00, 0xFC, 0x00, b'T', b'E', b'S', b'T', b'M', b'O', b'N', 0x0A, 0x20, 0x20,
    0x20, 0x20, 0x20,
];

pub const SERIAL_ABC123: [u8; 18] = [
    0x00, 0x00, 0x00, 0xFF, 0x00, b'A', b'B', b'C', b'1', b'2', b'3', 0x0A, 0x20, 0x20, 0x20,
    0x20, 0x20, 0x20,
];

/// 1.4 digital base block, feature byte 0x3E, no extensions.
pub fn base_block() -> [u8; BLOCK_SIZE] {
    let mut b = [0u8; BLOCK_SIZE];
    b[..8].copy_from_slice(&HEADER);
    b[8] = 0x10;
    b[9] = 0xAC;
    b[10] = 0xA1;
    b[11] = 0xA0;
    b[16] = 0x0C;
    b[17] = 0x1E;
    b[18] = 0x01;
    b[19] = 0x04;
    b[20] = 0xA5;
    b[21] = 0x3C;
    b[22] = 0x22;
    b[23] = 0x78;
    b[24] = 0x3E;
    b[54..72].copy_from_slice(&DTD_1080P);
    b[72..90].copy_from_slice(&RANGE_LIMITS);
    b[90..108].copy_from_slice(&NAME_TESTMON);
    b[108..126].copy_from_slice(&SERIAL_ABC123);
    seal(&mut b);
    b
}

pub fn base_block_with<F: FnOnce(&mut [u8; BLOCK_SIZE])>(edit: F) -> [u8; BLOCK_SIZE] {
    let mut b = base_block();
    edit(&mut b);
    seal(&mut b);
    b
}

pub fn seal(block: &mut [u8]) {
    block[CHECKSUM_OFFSET] = checksum(&block[..CHECKSUM_OFFSET]);
}

/// CTA-861 extension: revision 3, the given data blocks, feature bits from
/// `flags` (upper nibble) and the DTDs.
pub fn cta_block(data_blocks: &[&[u8]], flags: u8, dtds: &[[u8; 18]]) -> [u8; BLOCK_SIZE] {
    let mut b = [0u8; BLOCK_SIZE];
    b[0] = 0x02;
    b[1] = 0x03;
    let mut pos = 4;
    for block in data_blocks {
        b[pos..pos + block.len()].copy_from_slice(block);
        pos += block.len();
    }
    b[2] = pos as u8;
    b[3] = (flags & 0xF0) | (dtds.len() as u8 & 0x0F);
    for dtd in dtds {
        b[pos..pos + 18].copy_from_slice(dtd);
        pos += 18;
    }
    seal(&mut b);
    b
}

pub const AUDIO_LPCM: [u8; 4] = [0x23, 0x09, 0x07, 0x07];
pub const VIDEO_SVDS: [u8; 5] = [0x44, 0x90, 0x04, 0x03, 0x01];
pub const HDMI_VSDB: [u8; 9] = [0x68, 0x03, 0x0C, 0x00, 0x10, 0x00, 0xB8, 0x3C, 0x03];
pub const HDMI_FORUM_VSDB: [u8; 8] = [0x67, 0xD8, 0x5D, 0xC4, 0x01, 0x78, 0x88, 0x03];
pub const HDMI_FORUM_VSDB_SHORT: [u8; 6] = [0x65, 0xD8, 0x5D, 0xC4, 0x01, 0x78];
pub const SPEAKER_ALLOCATION: [u8; 4] = [0x83, 0x01, 0x00, 0x00];
pub const EXTENDED_VIDEO_CAP: [u8; 3] = [0xE2, 0x00, 0x0F];

pub fn full_cta_block() -> [u8; BLOCK_SIZE] {
    cta_block(
        &[
            &AUDIO_LPCM,
            &VIDEO_SVDS,
            &HDMI_VSDB,
            &HDMI_FORUM_VSDB,
            &SPEAKER_ALLOCATION,
            &EXTENDED_VIDEO_CAP,
        ],
        0xF0,
        &[DTD_1080P],
    )
}

/// Base block declaring one extension, followed by `full_cta_block`.
pub fn two_block_edid() -> Vec<u8> {
    let base = base_block_with(|b| b[EXTENSION_COUNT_OFFSET] = 1);
    let mut out = base.to_vec();
    out.extend_from_slice(&full_cta_block());
    out
}

pub fn with_extensions(extensions: &[[u8; BLOCK_SIZE]]) -> Vec<u8> {
    let base = base_block_with(|b| b[EXTENSION_COUNT_OFFSET] = extensions.len() as u8);
    let mut out = base.to_vec();
    for ext in extensions {
        out.extend_from_slice(ext);
    }
    out
}
