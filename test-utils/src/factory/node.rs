//! Node factory.
//!
//! Nodes default to an address nothing listens on. Point them at a `MockDaemon` when
//! the code under test talks to the daemon.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::{factory::helpers::next_id, mock_daemon::MockDaemon};

pub struct NodeFactory<'a> {
    db: &'a DatabaseConnection,
    location: i32,
    name: String,
    ip: String,
    daemon_listen: i32,
}

impl<'a> NodeFactory<'a> {
    /// Creates a new NodeFactory for a location.
    ///
    /// Defaults:
    /// - name: `"node{id}"`
    /// - address: `crate::mock_daemon::unreachable_endpoint()`
    pub fn new(db: &'a DatabaseConnection, location: i32) -> Self {
        let (ip, daemon_listen) = crate::mock_daemon::unreachable_endpoint();

        Self {
            db,
            location,
            name: format!("node{}", next_id()),
            ip,
            daemon_listen,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Points the node at a running mock daemon.
    pub fn daemon(mut self, daemon: &MockDaemon) -> Self {
        self.ip = daemon.host();
        self.daemon_listen = daemon.port();
        self
    }

    pub fn address(mut self, ip: impl Into<String>, port: i32) -> Self {
        self.ip = ip.into();
        self.daemon_listen = port;
        self
    }

    pub async fn build(self) -> Result<entity::node::Model, DbErr> {
        entity::node::ActiveModel {
            name: ActiveValue::Set(self.name),
            location: ActiveValue::Set(self.location),
            ip: ActiveValue::Set(self.ip),
            daemon_listen: ActiveValue::Set(self.daemon_listen),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a node in `location` with default values.
pub async fn create_node(
    db: &DatabaseConnection,
    location: i32,
) -> Result<entity::node::Model, DbErr> {
    NodeFactory::new(db, location).build().await
}
