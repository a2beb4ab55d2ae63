//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Entities with required foreign keys take the parent IDs
//! explicitly; `helpers` creates whole chains when the parents don't matter.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let owner = factory::user::create_user(&db).await?;
//! let location = factory::location::create_location(&db).await?;
//! let node = factory::node::create_node(&db, location.id).await?;
//! let server = factory::server::create_server(&db, node.id, owner.id).await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Registered, invited and admin users
//! - `location` - Locations
//! - `node` - Nodes, optionally pointed at a mock daemon
//! - `server` - Server rows
//! - `access` - Subusers, permissions and internal OAuth clients/tokens
//! - `account_change` - Registration and password reset tokens
//! - `autodeploy` - Auto-deploy codes
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod access;
pub mod account_change;
pub mod autodeploy;
pub mod helpers;
pub mod location;
pub mod node;
pub mod server;
pub mod user;

pub use location::create_location;
pub use node::create_node;
pub use server::create_server;
pub use user::{create_root_admin, create_user};
