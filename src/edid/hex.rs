// Thu Oct 15 2026 - Alex

use crate::edid::{EdidError, EdidResult, BLOCK_SIZE};

/// Decodes a contiguous hex string into bytes.
///
/// The string must have even length, contain only `[0-9a-fA-F]`, and cover
/// at least one 128-byte base block.
pub fn decode(hex: &str) -> EdidResult<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return Err(EdidError::malformed(format!(
            "hex string has odd length {}",
            hex.len()
        )));
    }

    let raw = hex.as_bytes();
    let mut bytes = Vec::with_capacity(raw.len() / 2);
    for (i, pair) in raw.chunks_exact(2).enumerate() {
        let hi = nibble(pair[0]).ok_or_else(|| invalid_digit(hex, i * 2))?;
        let lo = nibble(pair[1]).ok_or_else(|| invalid_digit(hex, i * 2 + 1))?;
        bytes.push((hi << 4) | lo);
    }

    if bytes.len() < BLOCK_SIZE {
        return Err(EdidError::malformed(format!(
            "decoded {} bytes, need at least {}",
            bytes.len(),
            BLOCK_SIZE
        )));
    }

    Ok(bytes)
}

/// Uppercase hex, two digits per byte.
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn invalid_digit(hex: &str, position: usize) -> EdidError {
    let ch = hex
        .get(position..)
        .and_then(|rest| rest.chars().next())
        .unwrap_or('?');
    EdidError::malformed(format!(
        "invalid hex character {:?} at position {}",
        ch, position
    ))
}
