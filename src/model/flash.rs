use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Severity used by the presentation layer to style a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Warning,
    Danger,
}

/// One flash message as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FlashDto {
    pub level: FlashLevel,
    /// Stable identifier of the message, e.g. `server_deleted`.
    pub kind: String,
    /// Message parameters, `null` when the message has none.
    #[schema(value_type = Object)]
    pub params: Value,
    /// Plain-text rendering of the message.
    pub text: String,
}
