use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::flash::FlashDto;

/// View model for `GET /auth/login`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginViewDto {
    pub xsrf: String,
    pub flash: Vec<FlashDto>,
}

/// View model for the password recovery pages.
///
/// `xsrf` is only present on the request form; the status pages set `noshow`
/// so the form is hidden.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PasswordViewDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xsrf: Option<String>,
    pub flash: Vec<FlashDto>,
    #[serde(default)]
    pub noshow: bool,
}

/// View model for `GET /auth/register[/{token}]`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterViewDto {
    pub xsrf: String,
    pub token: Option<String>,
    pub flash: Vec<FlashDto>,
}

/// `POST /auth/login` form body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub xsrf: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub totp_token: Option<String>,
    pub remember_me: Option<String>,
    #[serde(rename = "g-recaptcha-response")]
    pub captcha_response: Option<String>,
}

/// `POST /auth/login/totp` form body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TotpCheckForm {
    pub check: Option<String>,
}

/// `POST /auth/password` form body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasswordResetForm {
    #[serde(default)]
    pub xsrf: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "g-recaptcha-response")]
    pub captcha_response: Option<String>,
}

/// `POST /auth/register` form body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    pub token: Option<String>,
    #[serde(default)]
    pub xsrf: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
