//! Determinism-test helpers.
//!
//! Rendering tests assert that the same seed produces byte-identical frames
//! by comparing hashes instead of whole buffers.

use sha2::{Digest, Sha256};

/// Environment flag helper: accepts `1/true/yes/on` (case-insensitive).
pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

pub fn rgba_sha256_hex(rgba: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(rgba);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_and_content_sensitive() {
        let a = [0u8, 1, 2, 3];
        let b = [0u8, 1, 2, 4];
        assert_eq!(rgba_sha256_hex(&a), rgba_sha256_hex(&a));
        assert_ne!(rgba_sha256_hex(&a), rgba_sha256_hex(&b));
        assert_eq!(rgba_sha256_hex(&a).len(), 64);
    }
}
