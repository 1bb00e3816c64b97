//! Log sanitization utilities
//!
//! Keeps API secrets and large response bodies (full zone listings, long TXT
//! records) out of debug/error logs.

/// Maximum number of bytes of a body to include in log output.
const TRUNCATE_LIMIT: usize = 256;
/// Number of leading characters of a secret left visible when masked.
const VISIBLE_SECRET_PREFIX: usize = 4;

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

/// Truncate a response or request body for logging.
///
/// Bodies within the limit are returned unchanged; longer ones keep their first
/// `TRUNCATE_LIMIT` bytes plus a suffix with the total length.
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

/// Mask a credential, leaving a short prefix so keys can still be told apart in logs.
///
/// Secrets shorter than twice the visible prefix are masked entirely.
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() < VISIBLE_SECRET_PREFIX * 2 {
        return "***".to_string();
    }
    let prefix: String = secret.chars().take(VISIBLE_SECRET_PREFIX).collect();
    format!("{prefix}***")
}
