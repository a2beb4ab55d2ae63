//! Parameters and outcomes of the authentication flows.
//!
//! Each non-success outcome maps to exactly one flash message; the controller decides
//! where to redirect.

use crate::server::model::flash::FlashMessage;

#[derive(Debug, Clone)]
pub struct LoginParams {
    pub email: String,
    pub password: String,
    pub totp_token: Option<String>,
    pub ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials accepted; the token is now the user's `session_id`.
    Authenticated { session_token: String },
    InvalidCredentials,
    InvalidTotp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordResetOutcome {
    Requested,
    UnknownEmail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyOutcome {
    PasswordReset,
    Unverifiable,
}

#[derive(Debug, Clone)]
pub struct RegisterParams {
    pub token: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    TokenInvalid,
    InvalidUsername,
    WeakPassword,
    AccountExists,
}

impl RegisterOutcome {
    pub fn flash(self) -> FlashMessage {
        match self {
            Self::Registered => FlashMessage::AccountCreated,
            Self::TokenInvalid => FlashMessage::RegistrationTokenInvalid,
            Self::InvalidUsername => FlashMessage::InvalidUsername,
            Self::WeakPassword => FlashMessage::WeakPassword,
            Self::AccountExists => FlashMessage::AccountExists,
        }
    }
}

/// Result of the optional captcha check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptchaOutcome {
    Passed,
    Failed,
    Unavailable,
}

/// Kinds of `account_change` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountChangeType {
    Password,
    UserRegister,
}

impl AccountChangeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::UserRegister => "user_register",
        }
    }
}

/// Values for a new `account_change` row.
#[derive(Debug, Clone)]
pub struct CreateAccountChangeParams {
    pub user_id: Option<i32>,
    pub change_type: AccountChangeType,
    pub content: String,
    pub key: String,
    /// Expiry as unix seconds.
    pub expires: i64,
}
