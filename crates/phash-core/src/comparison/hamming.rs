/// Hamming distance at or below which two DCT hashes are conventionally duplicates.
/// Not enforced anywhere; callers pick their own threshold.
pub const DEFAULT_HAMMING_THRESHOLD: u32 = 10;

/// Number of differing bits between two 64-bit hashes, in [0, 64]
#[inline]
pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_zero() {
        for value in [0, 1, 0xdead_beef, u64::MAX] {
            assert_eq!(hamming_distance(value, value), 0);
        }
    }

    #[test]
    fn test_bounds_and_symmetry() {
        let values = [0u64, 1, 0xf0f0, 0x8000_0000_0000_0001, u64::MAX];
        for &a in &values {
            for &b in &values {
                let d = hamming_distance(a, b);
                assert!(d <= 64);
                assert_eq!(d, hamming_distance(b, a));
            }
        }
        assert_eq!(hamming_distance(0, u64::MAX), 64);
    }

    #[test]
    fn test_counts_bits() {
        assert_eq!(hamming_distance(0b1010, 0b0110), 2);
    }
}
