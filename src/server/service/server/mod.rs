//! Server lifecycle administration.
//!
//! Creation and deletion keep the local rows and the daemon in step: the local
//! changes run in one transaction that is committed only when the daemon call
//! succeeds (or, for deletion, when the admin forces it).

use sea_orm::DatabaseConnection;

use crate::server::service::daemon::DaemonClient;

pub mod create;
pub mod delete;
pub mod list;
pub mod lookup;

pub struct ServerService<'a> {
    pub db: &'a DatabaseConnection,
    pub daemon: &'a DaemonClient,
}

impl<'a> ServerService<'a> {
    /// Creates a new ServerService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `daemon` - Client used for node daemon calls
    ///
    /// # Returns
    /// - `ServerService` - New service instance
    pub fn new(db: &'a DatabaseConnection, daemon: &'a DaemonClient) -> Self {
        Self { db, daemon }
    }
}
