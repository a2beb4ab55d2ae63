//! Structured flash messages.
//!
//! Handlers never build markup. They push a `FlashMessage` into the session and the
//! next rendered view receives it as a `FlashDto` carrying a level, a stable kind, its
//! parameters and a plain-text rendering.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::flash::{FlashDto, FlashLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum FlashMessage {
    // Server administration
    ServerNotFound,
    ServerDeleted,
    ServerForceDeleted,
    ServerDeleteFailed,
    ServerCreated,
    NodeNotFound,
    InvalidServerName,
    OwnerEmailNotFound,
    ServerNameTaken,
    DaemonRequestFailed { detail: String },

    // Authentication
    InvalidXsrf,
    CaptchaFailed,
    CaptchaUnavailable,
    InvalidCredentials,
    InvalidTotp,

    // Password recovery
    PasswordResetSent,
    PasswordResetEmailUnknown,
    PasswordResetUnverifiable,
    NewPasswordSent,

    // Registration
    RegistrationTokenMissing,
    RegistrationTokenInvalid,
    InvalidUsername,
    WeakPassword,
    AccountExists,
    AccountCreated,
}

impl FlashMessage {
    pub fn level(&self) -> FlashLevel {
        match self {
            Self::ServerDeleted
            | Self::ServerCreated
            | Self::PasswordResetSent
            | Self::NewPasswordSent
            | Self::AccountCreated => FlashLevel::Success,
            Self::ServerForceDeleted | Self::InvalidXsrf => FlashLevel::Warning,
            _ => FlashLevel::Danger,
        }
    }

    pub fn text(&self) -> String {
        match self {
            Self::ServerNotFound => "A server by that ID does not exist in the system.".into(),
            Self::ServerDeleted => "The requested server has been deleted from the panel.".into(),
            Self::ServerForceDeleted => "An error was encountered with the daemon while trying to delete this server. Because a force delete was requested the server has been removed from the panel regardless. The server and its data may still exist on the daemon.".into(),
            Self::ServerDeleteFailed => "An error was encountered with the daemon while trying to delete this server from the system.".into(),
            Self::ServerCreated => "Server created successfully.".into(),
            Self::NodeNotFound => "The selected node does not exist on the system.".into(),
            Self::InvalidServerName => "The name provided for the server did not meet server requirements. Server names must be between 4 and 35 characters long and contain no special characters.".into(),
            Self::OwnerEmailNotFound => "The email provided does not match any account in the system.".into(),
            Self::ServerNameTaken => "That name is already in use by another server, please enter another name.".into(),
            Self::DaemonRequestFailed { detail } => format!(
                "An error occurred while trying to connect to the remote node. Please check that the daemon is running and try again. {detail}"
            ),
            Self::InvalidXsrf => "The XSRF token received was not valid. Please make sure cookies are enabled and try your request again.".into(),
            Self::CaptchaFailed => "The spam prevention was not filled out correctly. Please try it again.".into(),
            Self::CaptchaUnavailable => "Unable to query the captcha validation servers. Please try it again.".into(),
            Self::InvalidCredentials => "The username or password you submitted was incorrect.".into(),
            Self::InvalidTotp => "Your Two-Factor Authentication token was missing or incorrect.".into(),
            Self::PasswordResetSent => "We have sent an email to the address you provided. Please follow the instructions included in that email to continue. The verification key will expire in 4 hours.".into(),
            Self::PasswordResetEmailUnknown => "We couldn't find that email in our database.".into(),
            Self::PasswordResetUnverifiable => "Unable to verify password recovery request. Did the key expire? Please contact support for more help or try again.".into(),
            Self::NewPasswordSent => "You should receive an email shortly with your new account password. We suggest changing this once you log in.".into(),
            Self::RegistrationTokenMissing => "No token was submitted with the request.".into(),
            Self::RegistrationTokenInvalid => "The token you provided appears to be invalid.".into(),
            Self::InvalidUsername => "The username you entered does not meet the requirements. Must be at least 4 characters, and no more than 35. Username can only contain the following characters: a-zA-Z0-9_-".into(),
            Self::WeakPassword => "Your password is not complex enough. Please make sure to include at least one number, and some type of mixed case. Your new password must also be at least 8 characters long.".into(),
            Self::AccountExists => "Account with that username or email already exists in the system.".into(),
            Self::AccountCreated => "Your account has been created successfully, you may now login.".into(),
        }
    }

    /// Converts the message into the DTO handed to the presentation layer.
    pub fn into_dto(self) -> FlashDto {
        let level = self.level();
        let text = self.text();

        let (kind, params) = match serde_json::to_value(&self) {
            Ok(Value::Object(mut map)) => {
                let kind = match map.remove("kind") {
                    Some(Value::String(kind)) => kind,
                    _ => String::new(),
                };
                (kind, map.remove("params").unwrap_or(Value::Null))
            }
            _ => (String::new(), Value::Null),
        };

        FlashDto {
            level,
            kind,
            params,
            text,
        }
    }
}
