//! PufferPanel Test Utils
//!
//! Shared testing utilities for the panel crate. Tests get an in-memory SQLite
//! database with the panel schema, a session backed by the same database, entity
//! factories and a mock daemon that records the REST calls the panel makes.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Database connection and session for one test
//! - **factory**: Entity factories with sensible defaults
//! - **mock_daemon**: Local HTTP server standing in for a node daemon
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn creates_server() -> Result<(), AppError> {
//!     let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let user = factory::user::create_user(db).await?;
//!     // ...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod mock_daemon;
