use thiserror::Error;

/// Internal issues with the panel's data or environment indicating unexpected behavior
/// and possible bugs. Always surfaced as a 500 Internal Server Error.
#[derive(Error, Debug)]
pub enum InternalError {
    /// A server row references an owner that no longer exists.
    #[error("Server {server_id} references missing owner {owner_id}")]
    MissingServerOwner { server_id: i32, owner_id: i32 },

    /// A server row references a node that no longer exists.
    #[error("Server {server_id} references missing node {node_id}")]
    MissingServerNode { server_id: i32, node_id: i32 },

    /// A consumed account change points to a user that no longer exists.
    #[error("Account change {change_id} references a missing user")]
    MissingAccountChangeUser { change_id: i32 },

    /// The router was served without connection info, so the client IP is unknown.
    #[error("Client address is unavailable for this request")]
    MissingClientAddress,

    /// Password hashing failed inside argon2.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),

    /// A stored TOTP secret could not be decoded or the system clock is unusable.
    #[error("Failed to validate TOTP token: {0}")]
    Totp(String),

    /// Form data could not be encoded for the temporary recovery cookie.
    #[error("Failed to encode form data: {0}")]
    FormEncoding(#[from] serde_json::Error),
}
