//! Key hashing for [`StringMap`](crate::StringMap).

/// Hashes `key` with a times-33 accumulation seeded at zero.
///
/// Every byte is folded in as `hash * 33 + byte`, wrapping on overflow, so
/// the result spans the full `usize` range for long keys.
#[must_use]
pub fn hash_key(key: &str) -> usize {
    key.bytes().fold(0, |hash: usize, byte| {
        hash.wrapping_mul(33).wrapping_add(usize::from(byte))
    })
}
