//! GT-511C checksum algorithm
//!
//! The checksum is the plain byte sum of every byte that precedes it in the
//! frame, truncated to 16 bits.

use tracing::trace;

/// Calculate packet checksum
///
/// # Examples
///
/// ```
/// use gt511_core::checksum;
///
/// assert_eq!(checksum::calculate(&[0x55, 0xAA, 0x01, 0x00]), 0x0100);
/// ```
pub fn calculate(bytes: &[u8]) -> u16 {
    let checksum = bytes
        .iter()
        .fold(0u16, |sum, &byte| sum.wrapping_add(u16::from(byte)));

    trace!(
        len = bytes.len(),
        checksum = format!("0x{:04X}", checksum),
        "Calculated checksum"
    );

    checksum
}

/// Verify checksum
pub fn verify(bytes: &[u8], expected: u16) -> bool {
    calculate(bytes) == expected
}
