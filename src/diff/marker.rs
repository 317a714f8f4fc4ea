// Fri Oct 16 2026 - Alex

use itertools::{EitherOrBoth, Itertools};

/// Marks where `patched` differs from `original`, character by character:
/// `-` where they agree, the patched character where they differ.
///
/// The result is as long as the longer input. Characters only the patched
/// string has are emitted as-is, characters only the original has (removed
/// bytes) become a space.
pub fn marker(original: &str, patched: &str) -> String {
    original
        .chars()
        .zip_longest(patched.chars())
        .map(|pair| match pair {
            EitherOrBoth::Both(a, b) if a.eq_ignore_ascii_case(&b) => '-',
            EitherOrBoth::Both(_, b) | EitherOrBoth::Right(b) => b,
            EitherOrBoth::Left(_) => ' ',
        })
        .collect()
}

/// Splits a hex string into rows of `bytes_per_row` bytes, for display next
/// to the marker line.
pub fn rows(hex: &str, bytes_per_row: usize) -> Vec<String> {
    let width = bytes_per_row.max(1) * 2;
    let chars: Vec<char> = hex.chars().collect();
    chars.chunks(width).map(|chunk| chunk.iter().collect()).collect()
}
