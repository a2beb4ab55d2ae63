//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records: lookups by
//! email, session token and ID, the admin account search, and the session, password
//! and registration updates performed by the authentication flows.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to a database connection or open transaction
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id).one(self.db).await
    }

    /// Fetches all users with the given IDs; unknown IDs are silently skipped.
    pub async fn find_by_ids(&self, ids: Vec<i32>) -> Result<Vec<entity::user::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids))
            .all(self.db)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Finds the user owning a session token, bound to the address it was issued for.
    ///
    /// # Arguments
    /// - `token` - Value of the `pp_auth_token` cookie
    /// - `ip` - Address of the requesting client
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - A user with that session token and session IP
    /// - `Ok(None)` - No matching session
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_session(
        &self,
        token: &str,
        ip: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::SessionId.eq(token))
            .filter(entity::user::Column::SessionIp.eq(ip))
            .one(self.db)
            .await
    }

    /// Returns every root administrator ordered by ID.
    pub async fn get_root_admins(&self) -> Result<Vec<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::RootAdmin.eq(true))
            .order_by_asc(entity::user::Column::Id)
            .all(self.db)
            .await
    }

    /// Searches users whose email or username contains `query`.
    ///
    /// # Arguments
    /// - `query` - Substring to look for
    ///
    /// # Returns
    /// - `Ok(Vec<Model>)` - Matching users ordered by email
    /// - `Err(DbErr)` - Database error during query
    pub async fn search(&self, query: &str) -> Result<Vec<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(
                Condition::any()
                    .add(entity::user::Column::Email.contains(query))
                    .add(entity::user::Column::Username.contains(query)),
            )
            .order_by_asc(entity::user::Column::Email)
            .all(self.db)
            .await
    }

    /// Checks whether any account other than `exclude_id` uses the username or email.
    pub async fn username_or_email_taken(
        &self,
        username: &str,
        email: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::User::find().filter(
            Condition::any()
                .add(entity::user::Column::Username.eq(username))
                .add(entity::user::Column::Email.eq(email)),
        );

        if let Some(id) = exclude_id {
            query = query.filter(entity::user::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Records a new login session on the user.
    pub async fn set_session(
        &self,
        id: i32,
        token: &str,
        ip: &str,
    ) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            id: ActiveValue::Unchanged(id),
            session_id: ActiveValue::Set(Some(token.to_string())),
            session_ip: ActiveValue::Set(Some(ip.to_string())),
            ..Default::default()
        }
        .update(self.db)
        .await
    }

    /// Clears the session fields, logging the user out everywhere.
    pub async fn clear_session(&self, id: i32) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            id: ActiveValue::Unchanged(id),
            session_id: ActiveValue::Set(None),
            session_ip: ActiveValue::Set(None),
            ..Default::default()
        }
        .update(self.db)
        .await
    }

    /// Replaces the user's password hash.
    pub async fn set_password(
        &self,
        id: i32,
        password_hash: String,
    ) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            id: ActiveValue::Unchanged(id),
            password: ActiveValue::Set(Some(password_hash)),
            ..Default::default()
        }
        .update(self.db)
        .await
    }

    /// Completes a pending registration by setting username, password hash and
    /// registration time.
    ///
    /// # Arguments
    /// - `id` - ID of the invited user
    /// - `username` - Chosen username
    /// - `password_hash` - Argon2 hash of the chosen password
    /// - `register_time` - Unix seconds of the registration
    ///
    /// # Returns
    /// - `Ok(Model)` - The updated user
    /// - `Err(DbErr)` - User does not exist or update failed
    pub async fn complete_registration(
        &self,
        id: i32,
        username: String,
        password_hash: String,
        register_time: i64,
    ) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            id: ActiveValue::Unchanged(id),
            username: ActiveValue::Set(Some(username)),
            password: ActiveValue::Set(Some(password_hash)),
            register_time: ActiveValue::Set(register_time),
            ..Default::default()
        }
        .update(self.db)
        .await
    }
}
