//! Server data repository.
//!
//! Provides the `ServerRepository` for reading and writing `servers` rows, including the
//! cascading removal of every row that references a server.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::server::CreateServerRecord;

pub struct ServerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ServerRepository<'a, C> {
    /// Creates a new ServerRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to a database connection or open transaction
    ///
    /// # Returns
    /// - `ServerRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new active server row.
    ///
    /// # Arguments
    /// - `record` - Row values with pre-generated unique hash and daemon secret
    ///
    /// # Returns
    /// - `Ok(Model)` - The inserted server
    /// - `Err(DbErr)` - Insert failed, e.g. a unique constraint was violated
    pub async fn create(&self, record: CreateServerRecord) -> Result<entity::server::Model, DbErr> {
        entity::server::ActiveModel {
            hash: ActiveValue::Set(record.hash),
            daemon_secret: ActiveValue::Set(record.daemon_secret),
            node: ActiveValue::Set(record.node),
            name: ActiveValue::Set(record.name),
            owner_id: ActiveValue::Set(record.owner_id),
            active: ActiveValue::Set(true),
            date_added: ActiveValue::Set(record.date_added),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::server::Model>, DbErr> {
        entity::prelude::Server::find_by_id(id).one(self.db).await
    }

    /// Returns every server, active ones first.
    pub async fn get_all_by_active(&self) -> Result<Vec<entity::server::Model>, DbErr> {
        entity::prelude::Server::find()
            .order_by_desc(entity::server::Column::Active)
            .order_by_asc(entity::server::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn name_exists(&self, name: &str) -> Result<bool, DbErr> {
        self.column_has(entity::server::Column::Name, name).await
    }

    pub async fn hash_exists(&self, hash: &str) -> Result<bool, DbErr> {
        self.column_has(entity::server::Column::Hash, hash).await
    }

    pub async fn daemon_secret_exists(&self, secret: &str) -> Result<bool, DbErr> {
        self.column_has(entity::server::Column::DaemonSecret, secret)
            .await
    }

    async fn column_has(&self, column: entity::server::Column, value: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Server::find()
            .filter(column.eq(value))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Deletes a server together with its subusers, permissions, OAuth clients and
    /// OAuth access tokens.
    ///
    /// Rows are removed children first. Callers that need all-or-nothing semantics
    /// pass an open transaction as the connection.
    ///
    /// # Arguments
    /// - `server_id` - ID of the server to delete
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of server rows deleted (0 or 1)
    /// - `Err(DbErr)` - Database error during any of the deletes
    pub async fn delete_with_access(&self, server_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Subuser::delete_many()
            .filter(entity::subuser::Column::Server.eq(server_id))
            .exec(self.db)
            .await?;

        entity::prelude::Permission::delete_many()
            .filter(entity::permission::Column::Server.eq(server_id))
            .exec(self.db)
            .await?;

        let client_ids: Vec<i32> = entity::prelude::OauthClient::find()
            .select_only()
            .column(entity::oauth_client::Column::Id)
            .filter(entity::oauth_client::Column::ServerId.eq(server_id))
            .into_tuple()
            .all(self.db)
            .await?;

        if !client_ids.is_empty() {
            entity::prelude::OauthAccessToken::delete_many()
                .filter(entity::oauth_access_token::Column::OauthClientId.is_in(client_ids.clone()))
                .exec(self.db)
                .await?;

            entity::prelude::OauthClient::delete_many()
                .filter(entity::oauth_client::Column::Id.is_in(client_ids))
                .exec(self.db)
                .await?;
        }

        let result = entity::prelude::Server::delete_by_id(server_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
