//! Panel authentication: password login with optional TOTP, logout, password
//! recovery, token-gated registration and the node auto-deploy script.

use sea_orm::DatabaseConnection;

use crate::server::service::email::EmailService;

pub mod credentials;
pub mod deploy;
pub mod login;
pub mod password;
pub mod register;

/// Length of generated session tokens and replacement passwords.
pub const SESSION_TOKEN_LENGTH: usize = 12;
/// Length of password reset keys.
pub const RESET_KEY_LENGTH: usize = 30;
/// Lifetime of a password reset key in seconds.
pub const RESET_KEY_TTL_SECS: i64 = 4 * 60 * 60;

pub struct AuthService<'a> {
    pub db: &'a DatabaseConnection,
    pub email: &'a EmailService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, email: &'a EmailService) -> Self {
        Self { db, email }
    }
}
