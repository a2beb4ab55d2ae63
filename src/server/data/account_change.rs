//! Repository for time-boxed, single-use `account_change` tokens.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

use crate::server::model::auth::{AccountChangeType, CreateAccountChangeParams};

pub struct AccountChangeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AccountChangeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateAccountChangeParams,
    ) -> Result<entity::account_change::Model, DbErr> {
        entity::account_change::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            change_type: ActiveValue::Set(params.change_type.as_str().to_string()),
            content: ActiveValue::Set(params.content),
            key: ActiveValue::Set(params.key),
            time: ActiveValue::Set(params.expires),
            verified: ActiveValue::Set(false),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Finds an unverified token of the given type that expires after `now`.
    ///
    /// # Arguments
    /// - `key` - Token submitted by the user
    /// - `change_type` - Expected kind of change
    /// - `now` - Current unix seconds
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - A pending, unexpired token
    /// - `Ok(None)` - Unknown, consumed, expired or of another type
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_pending(
        &self,
        key: &str,
        change_type: AccountChangeType,
        now: i64,
    ) -> Result<Option<entity::account_change::Model>, DbErr> {
        entity::prelude::AccountChange::find()
            .filter(entity::account_change::Column::Key.eq(key))
            .filter(entity::account_change::Column::ChangeType.eq(change_type.as_str()))
            .filter(entity::account_change::Column::Verified.eq(false))
            .filter(entity::account_change::Column::Time.gt(now))
            .one(self.db)
            .await
    }

    /// Consumes a token by deleting its row.
    ///
    /// # Returns
    /// - `Ok(true)` - The row existed and was deleted
    /// - `Ok(false)` - The row was already gone
    pub async fn consume(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::AccountChange::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
