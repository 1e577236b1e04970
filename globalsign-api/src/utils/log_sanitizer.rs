//! Log sanitization utilities
//!
//! Keeps API passwords, CSRs and certificate bodies out of debug/error logs.

use sha2::{Digest, Sha256};

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Replacement for masked secrets.
pub const MASK: &str = "******";

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise returns the first `TRUNCATE_LIMIT` characters with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Replaces every occurrence of `secret` in `s` with [`MASK`].
pub fn mask_secret(s: &str, secret: &str) -> String {
    if secret.is_empty() {
        s.to_string()
    } else {
        s.replace(secret, MASK)
    }
}

/// Short, stable identifier for a CSR or certificate so logs can correlate it without
/// printing the PEM body.
///
/// Whitespace is ignored, so the same CSR with different line endings fingerprints the same.
pub fn pem_fingerprint(pem: &str) -> String {
    let mut hasher = Sha256::new();
    for chunk in pem.split_whitespace() {
        hasher.update(chunk.as_bytes());
    }
    let digest = hex::encode(hasher.finalize());
    format!("sha256:{}", &digest[..16])
}
