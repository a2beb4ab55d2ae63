//! Password hashing and TOTP validation.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use totp_rs::{Algorithm, Secret, TOTP};

use crate::server::error::{internal::InternalError, AppError};

/// Hashes a password with argon2 and a random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| InternalError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Checks a password against a stored argon2 hash.
///
/// A stored value that is not a valid hash never matches.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("Stored password hash could not be parsed");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Validates a 6 digit TOTP code against a base32 secret, allowing one step of skew.
pub fn verify_totp(secret_b32: &str, token: &str, account: &str) -> Result<bool, AppError> {
    let token = token.trim();
    if token.len() != 6 || !token.chars().all(|c| c.is_ascii_digit()) {
        return Ok(false);
    }

    let secret = Secret::Encoded(secret_b32.to_string())
        .to_bytes()
        .map_err(|e| InternalError::Totp(format!("{e:?}")))?;

    let totp = TOTP::new_unchecked(Algorithm::SHA1, 6, 1, 30, secret, None, account.to_string());

    totp.check_current(token)
        .map_err(|e| InternalError::Totp(e.to_string()).into())
}
