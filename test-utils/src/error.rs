use thiserror::Error;

/// Errors raised while setting up a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// The session table could not be created.
    #[error("Failed to prepare session store: {0}")]
    SessionStore(#[from] sea_orm::SqlxError),

    /// The mock daemon could not bind its listener.
    #[error("Failed to start mock daemon: {0}")]
    MockDaemon(#[from] std::io::Error),

    #[error("Test context was not initialized")]
    NotInitialized,
}
