use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No `pp_auth_token` cookie, or the cookie does not match a user session
    /// bound to the requesting IP address.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Request carries no valid panel session")]
    NotLoggedIn,

    /// User is logged in but is not a root administrator.
    ///
    /// Results in a 403 Forbidden response. The message is logged for diagnostics.
    ///
    /// # Fields
    /// - User ID of the account that was denied
    /// - Description of the attempted action
    #[error("User {0} was denied access: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `NotLoggedIn` → 401 Unauthorized
/// - `AccessDenied` → 403 Forbidden
///
/// Both are logged at debug level while the client-facing message stays generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotLoggedIn => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "You must be logged in to access this page.".to_string(),
                }),
            )
                .into_response(),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "You do not have permission to access this page.".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
