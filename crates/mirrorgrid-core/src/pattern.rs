//! Bit patterns: random ones, and deterministic ones derived from a hex
//! digest of arbitrary text.
//!
//! A digest is read as a sequence of bytes, two hex characters each. The
//! first byte selects a rotation; each following byte contributes one bit,
//! set when the byte has an even number of one bits.

use rand::Rng;

use crate::error::GridError;
use crate::style::Color;

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Shortest digest [`hash_text`] callers should ask for.
pub const MIN_DIGEST_LEN: usize = 32;

/// `n` fair coin flips.
pub fn random_bits(rng: &mut impl Rng, n: usize) -> Vec<bool> {
    (0..n).map(|_| rng.random_bool(0.5)).collect()
}

/// Hex digest length needed to derive `bit_count` bits: one rotation byte
/// plus one byte per bit, never below [`MIN_DIGEST_LEN`].
#[inline]
pub fn digest_len(bit_count: usize) -> usize {
    (2 + 2 * bit_count).max(MIN_DIGEST_LEN)
}

fn fnv1a_update(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= u64::from(*byte);
        *hash = hash.wrapping_mul(FNV_PRIME);
    }
}

/// Lowercase hex digest of `text`, exactly `hex_len` characters long.
///
/// Built from 64-bit FNV-1a blocks; block `i` hashes the little-endian block
/// index followed by the UTF-8 bytes of `text`, so longer digests extend
/// shorter ones.
pub fn hash_text(text: &str, hex_len: usize) -> String {
    let mut out = String::with_capacity(hex_len + 16);
    let mut block: u64 = 0;
    while out.len() < hex_len {
        let mut hash = FNV_OFFSET_BASIS;
        fnv1a_update(&mut hash, &block.to_le_bytes());
        fnv1a_update(&mut hash, text.as_bytes());
        out.push_str(&format!("{hash:016x}"));
        block += 1;
    }
    out.truncate(hex_len);
    out
}

fn hex_bytes(hash: &str, count: usize) -> Result<Vec<u8>, GridError> {
    let chars: Vec<char> = hash.chars().collect();
    let needed = 2 * count;
    if chars.len() < needed {
        return Err(GridError::PatternLengthMismatch {
            needed,
            available: chars.len(),
        });
    }
    let digit = |pos: usize| {
        let ch = chars[pos];
        ch.to_digit(16)
            .map(|d| d as u8)
            .ok_or(GridError::InvalidDigest { pos, ch })
    };
    (0..count)
        .map(|i| -> Result<u8, GridError> { Ok((digit(2 * i)? << 4) | digit(2 * i + 1)?) })
        .collect()
}

/// Derive `bit_count` bits from a hex digest.
///
/// The first byte, modulo `bit_count`, is a left-rotation offset applied to
/// the raw bits taken from the next `bit_count` bytes (even parity → `true`).
/// Fails when the digest has fewer than `2 + 2 * bit_count` characters or
/// contains a non-hex character among them.
pub fn derive_bits_from_hash(hash: &str, bit_count: usize) -> Result<Vec<bool>, GridError> {
    if bit_count == 0 {
        return Ok(Vec::new());
    }
    let bytes = hex_bytes(hash, bit_count + 1)?;
    let offset = bytes[0] as usize % bit_count;
    let mut bits: Vec<bool> = bytes[1..]
        .iter()
        .map(|b| b.count_ones() % 2 == 0)
        .collect();
    bits.rotate_left(offset);
    Ok(bits)
}

/// Opaque colour taken from the last six hex characters of a digest.
pub fn color_from_digest(hash: &str) -> Result<Color, GridError> {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() < 6 {
        return Err(GridError::PatternLengthMismatch {
            needed: 6,
            available: chars.len(),
        });
    }
    let start = chars.len() - 6;
    let tail: String = chars[start..].iter().collect();
    if let Some((i, &ch)) = chars[start..].iter().enumerate().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(GridError::InvalidDigest { pos: start + i, ch });
    }
    Color::from_hex6(&tail).ok_or(GridError::InvalidDigest {
        pos: start,
        ch: chars[start],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // Raw bytes after the rotation byte, and the parity bit each maps to.
    const BODY: &str = "00010307ff0f3c0102aa5580fe7e11";
    const RAW: [bool; 15] = [
        true, false, true, false, true, true, true, false, false, true, true, false, false, true,
        true,
    ];

    #[test]
    fn offset_equal_to_bit_count_means_no_rotation() {
        let hash = format!("0f{BODY}");
        assert_eq!(derive_bits_from_hash(&hash, 15).unwrap(), RAW.to_vec());
    }

    #[test]
    fn offset_rotates_left() {
        let hash = format!("01{BODY}");
        let bits = derive_bits_from_hash(&hash, 15).unwrap();
        let mut expected = RAW.to_vec();
        expected.rotate_left(1);
        assert_eq!(bits, expected);
        assert_eq!(bits[14], RAW[0]);

        // 0x13 = 19, 19 % 15 = 4
        let bits = derive_bits_from_hash(&format!("13{BODY}"), 15).unwrap();
        assert_eq!(bits[0], RAW[4]);
        assert_eq!(bits[11], RAW[0]);
    }

    #[test]
    fn derive_is_deterministic() {
        let hash = hash_text("hello world", digest_len(15));
        let a = derive_bits_from_hash(&hash, 15).unwrap();
        let b = derive_bits_from_hash(&hash, 15).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 15);
    }

    #[test]
    fn derive_rejects_short_digest() {
        let err = derive_bits_from_hash("0f0001", 15).unwrap_err();
        assert_eq!(
            err,
            GridError::PatternLengthMismatch {
                needed: 32,
                available: 6
            }
        );
    }

    #[test]
    fn derive_rejects_non_hex() {
        let hash = format!("0f00zz{}", &BODY[4..]);
        assert_eq!(
            derive_bits_from_hash(&hash, 15).unwrap_err(),
            GridError::InvalidDigest { pos: 4, ch: 'z' }
        );
    }

    #[test]
    fn derive_zero_bits_is_empty() {
        assert!(derive_bits_from_hash("", 0).unwrap().is_empty());
    }

    #[test]
    fn derive_ignores_trailing_characters() {
        let hash = format!("0f{BODY}ffff");
        assert_eq!(derive_bits_from_hash(&hash, 15).unwrap(), RAW.to_vec());
    }

    #[test]
    fn hash_text_known_values() {
        // FNV-1a of eight zero bytes (block 0) with empty text.
        let mut h = FNV_OFFSET_BASIS;
        fnv1a_update(&mut h, &[0u8; 8]);
        assert_eq!(hash_text("", 16), format!("{h:016x}"));
        assert_eq!(hash_text("abc", 32).len(), 32);
        assert_eq!(hash_text("abc", 5).len(), 5);
        assert!(hash_text("abc", 64).starts_with(&hash_text("abc", 32)));
        assert_ne!(hash_text("abc", 32), hash_text("abd", 32));
        assert!(hash_text("héllo", 40).chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_len_grows_with_bits() {
        assert_eq!(digest_len(15), 32);
        assert_eq!(digest_len(4), 32);
        assert_eq!(digest_len(28), 58);
    }

    #[test]
    fn color_uses_last_six_digits() {
        assert_eq!(
            color_from_digest("0000001e90ff").unwrap(),
            Color::from_rgb(30, 144, 255)
        );
        assert!(color_from_digest("abc").is_err());
        assert_eq!(
            color_from_digest("00001e90fg").unwrap_err(),
            GridError::InvalidDigest { pos: 9, ch: 'g' }
        );
    }

    #[test]
    fn random_bits_seeded_is_reproducible() {
        let a = random_bits(&mut StdRng::seed_from_u64(7), 15);
        let b = random_bits(&mut StdRng::seed_from_u64(7), 15);
        assert_eq!(a.len(), 15);
        assert_eq!(a, b);
    }
}
