//! Per-record checksum and erased-slot detection.
//!
//! Every record ends in a one-byte checksum: the XOR of all preceding bytes,
//! seeded with [`CHECKSUM_SEED`]. A record whose bytes (checksum excluded) are
//! all [`ERASED_BYTE`] has never been written and is never checksummed.

use crate::layout::{CHECKSUM_SEED, ERASED_BYTE};

#[inline]
fn body(record: &[u8]) -> &[u8] {
    &record[..record.len().saturating_sub(1)]
}

/// Whether the record slot still holds the erased-flash pattern.
pub fn is_erased(record: &[u8]) -> bool {
    body(record).iter().all(|&b| b == ERASED_BYTE)
}

pub fn compute(record: &[u8]) -> u8 {
    body(record).iter().fold(CHECKSUM_SEED, |crc, &b| crc ^ b)
}

/// Erased records always verify.
pub fn verify(record: &[u8]) -> bool {
    if is_erased(record) {
        return true;
    }
    match record.last() {
        Some(&stored) => stored == compute(record),
        None => true,
    }
}

/// Write the trailing checksum byte unless the record is erased.
pub fn apply(record: &mut [u8]) {
    if record.is_empty() || is_erased(record) {
        return;
    }
    let crc = compute(record);
    let last = record.len() - 1;
    record[last] = crc;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erased_ignores_checksum_byte() {
        let mut record = [0xFFu8; 16];
        assert!(is_erased(&record));
        record[15] = 0x00;
        assert!(is_erased(&record));
        assert!(verify(&record));
        record[3] = 0xFE;
        assert!(!is_erased(&record));
    }

    #[test]
    fn xor_fold_with_seed() {
        let mut record = [0u8; 16];
        record[0] = 0x12;
        record[1] = 0x34;
        record[14] = 0x01;
        assert_eq!(compute(&record), 0xA5 ^ 0x12 ^ 0x34 ^ 0x01);

        let zeros = [0u8; 16];
        assert_eq!(compute(&zeros), 0xA5);
    }

    #[test]
    fn apply_then_verify() {
        let mut record = [0u8; 24];
        record[..4].copy_from_slice(b"ABCD");
        assert!(!verify(&record));
        apply(&mut record);
        assert!(verify(&record));

        record[23] ^= 0x01;
        assert!(!verify(&record));
    }

    #[test]
    fn apply_leaves_erased_untouched() {
        let mut record = [0xFFu8; 48];
        apply(&mut record);
        assert_eq!(record, [0xFFu8; 48]);
    }
}
