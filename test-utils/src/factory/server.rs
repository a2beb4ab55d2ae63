use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for server rows. The daemon is not involved.
pub struct ServerFactory<'a> {
    db: &'a DatabaseConnection,
    node: i32,
    owner_id: i32,
    name: String,
    hash: String,
    daemon_secret: String,
    active: bool,
}

impl<'a> ServerFactory<'a> {
    /// Defaults:
    /// - name: `"server_{id}"`
    /// - hash: `"hash-{id}"`
    /// - daemon_secret: `"secret-{id}"`
    /// - active: `true`
    pub fn new(db: &'a DatabaseConnection, node: i32, owner_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            node,
            owner_id,
            name: format!("server_{}", id),
            hash: format!("hash-{}", id),
            daemon_secret: format!("secret-{}", id),
            active: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    pub fn daemon_secret(mut self, secret: impl Into<String>) -> Self {
        self.daemon_secret = secret.into();
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub async fn build(self) -> Result<entity::server::Model, DbErr> {
        entity::server::ActiveModel {
            hash: ActiveValue::Set(self.hash),
            daemon_secret: ActiveValue::Set(self.daemon_secret),
            node: ActiveValue::Set(self.node),
            name: ActiveValue::Set(self.name),
            owner_id: ActiveValue::Set(self.owner_id),
            active: ActiveValue::Set(self.active),
            date_added: ActiveValue::Set(1_700_000_000),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_server(
    db: &DatabaseConnection,
    node: i32,
    owner_id: i32,
) -> Result<entity::server::Model, DbErr> {
    ServerFactory::new(db, node, owner_id).build().await
}
