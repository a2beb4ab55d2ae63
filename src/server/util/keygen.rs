//! Random tokens, unique identifiers and digests.

use rand::{distr::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

/// Generates a random alphanumeric string of `len` characters.
///
/// Used for session tokens, generated passwords, account change keys and
/// OAuth secrets.
pub fn keygen(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generates a hyphenated UUID v4 string.
pub fn uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Hex digest of the trimmed, lower-cased email, used by avatar services.
pub fn email_hash(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    hex::encode(digest)
}

/// Current time as unix seconds.
pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}
