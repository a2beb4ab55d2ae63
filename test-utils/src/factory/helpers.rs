//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

use crate::mock_daemon::MockDaemon;

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created entity gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a server hosted on a node that points at `daemon`.
///
/// This is a convenience method that creates:
/// 1. User (as owner)
/// 2. Location
/// 3. Node listening on the mock daemon's address
/// 4. Server
///
/// # Arguments
/// - `db` - Database connection
/// - `daemon` - Mock daemon the node should point at
///
/// # Returns
/// - `Ok((owner, node, server))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_server_on_daemon(
    db: &DatabaseConnection,
    daemon: &MockDaemon,
) -> Result<
    (
        entity::user::Model,
        entity::node::Model,
        entity::server::Model,
    ),
    DbErr,
> {
    let owner = crate::factory::user::create_user(db).await?;
    let location = crate::factory::location::create_location(db).await?;
    let node = crate::factory::node::NodeFactory::new(db, location.id)
        .daemon(daemon)
        .build()
        .await?;
    let server = crate::factory::server::create_server(db, node.id, owner.id).await?;

    Ok((owner, node, server))
}
