//! Bucket selection.
//!
//! The flat table hashes the key as a single 32-bit FNV-1a word so that small
//! sequential keys land in distinct buckets. The chained table uses the key
//! modulo the bucket count directly.

use crate::Key;

/// FNV-1a 32-bit offset basis
pub const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;

/// FNV-1a 32-bit prime
pub const FNV_PRIME: u32 = 0x0100_0193;

/// One FNV-1a round over the whole key as a single word (not byte-wise)
#[inline]
pub const fn fnv1a_word(key: Key) -> u32 {
    (FNV_OFFSET_BASIS ^ key).wrapping_mul(FNV_PRIME)
}

/// Flat bucket index. `bucket_count` must be a power of two.
#[inline]
pub fn flat_bucket_index(key: Key, bucket_count: usize) -> usize {
    debug_assert!(bucket_count.is_power_of_two());
    (fnv1a_word(key) as usize) & (bucket_count - 1)
}

/// Chained bucket index
#[inline]
pub fn chained_bucket_index(key: Key, bucket_count: usize) -> usize {
    debug_assert!(bucket_count > 0);
    key as usize % bucket_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv_constants() {
        assert_eq!(fnv1a_word(0), FNV_OFFSET_BASIS.wrapping_mul(FNV_PRIME));
        assert_eq!(fnv1a_word(0), 0x050c_5d1f);
    }

    #[test]
    fn test_flat_index_in_range() {
        for key in (0..1_000_000).step_by(997) {
            assert!(flat_bucket_index(key, 8192) < 8192);
            assert!(flat_bucket_index(key, 1) == 0);
        }
    }

    #[test]
    fn test_flat_index_deterministic() {
        assert_eq!(flat_bucket_index(42, 8192), flat_bucket_index(42, 8192));
    }

    #[test]
    fn test_sequential_keys_spread() {
        // the low bits of the product only depend on the low bits of the key,
        // and the odd multiplier is a bijection modulo a power of two
        let mut seen = vec![false; 8192];
        for key in 0..8192 {
            let idx = flat_bucket_index(key, 8192);
            assert!(!seen[idx], "bucket {} hit twice", idx);
            seen[idx] = true;
        }
    }

    #[test]
    fn test_chained_index() {
        assert_eq!(chained_bucket_index(0, 10_001), 0);
        assert_eq!(chained_bucket_index(10_001, 10_001), 0);
        assert_eq!(chained_bucket_index(10_002, 10_001), 1);
        assert_eq!(chained_bucket_index(1_000_000, 10_001), 1_000_000 % 10_001);
    }
}
