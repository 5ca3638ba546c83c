//! Deterministic hashing. The standard library's `HashMap` is randomly seeded per process, which
//! is fine for lookups but not for anything that feeds back into a simulation. Maps here use the
//! Fx hasher and string hashes use xxh3, both of which are stable across runs and platforms.

use xxhash_rust::xxh3::xxh3_64;

pub use rustc_hash::FxHashMap as HashMap;

/// A convenience method to compute the hash of a `&str`.
#[must_use]
pub fn hash_str(data: &str) -> u64 {
    xxh3_64(data.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_strings() {
        assert_eq!(hash_str("PlacementRng"), hash_str("PlacementRng"));
        assert_ne!(hash_str("PlacementRng"), hash_str("VulnerabilityRng"));
    }
}
