use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Failures talking to a remote daemon.
#[derive(Error, Debug)]
pub enum DaemonError {
    /// The daemon could not be reached or returned an unreadable body.
    #[error("Unable to reach daemon: {0}")]
    Transport(#[from] reqwest::Error),

    /// The node's address does not form a valid URL.
    #[error("Invalid daemon address: {0}")]
    Url(#[from] url::ParseError),

    /// The daemon answered with `success: false`.
    #[error("Daemon rejected the request: {message} (code {code})")]
    Rejected {
        /// The daemon's `msg` field, or a placeholder when absent
        message: String,
        /// The daemon's `code` field rendered as text
        code: String,
    },
}

impl DaemonError {
    /// Builds a `Rejected` error from the optional `msg`/`code` fields of a daemon response.
    pub fn rejected(message: Option<String>, code: Option<Value>) -> Self {
        let code = match code {
            Some(Value::String(code)) => code,
            Some(Value::Null) | None => "unknown".to_string(),
            Some(other) => other.to_string(),
        };

        Self::Rejected {
            message: message.unwrap_or_else(|| "no message provided".to_string()),
            code,
        }
    }
}

/// Converts daemon errors into HTTP responses.
///
/// - `Transport` → 503 Service Unavailable
/// - `Rejected` → 502 Bad Gateway
/// - `Url` → 500 Internal Server Error
impl IntoResponse for DaemonError {
    fn into_response(self) -> Response {
        tracing::warn!("{}", self);

        let (status, error) = match self {
            Self::Transport(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "The daemon for this node could not be reached.",
            ),
            Self::Rejected { .. } => (
                StatusCode::BAD_GATEWAY,
                "The daemon for this node rejected the request.",
            ),
            Self::Url(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (
            status,
            Json(ErrorDto {
                error: error.to_string(),
            }),
        )
            .into_response()
    }
}
