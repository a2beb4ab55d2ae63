//! OAuth client and access token repository.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::model::oauth::CreateOAuthClientParams;

pub struct OAuthRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OAuthRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create_client(
        &self,
        params: CreateOAuthClientParams,
    ) -> Result<entity::oauth_client::Model, DbErr> {
        entity::oauth_client::ActiveModel {
            client_id: ActiveValue::Set(params.client_id),
            client_secret: ActiveValue::Set(params.client_secret),
            user_id: ActiveValue::Set(params.user_id),
            server_id: ActiveValue::Set(params.server_id),
            scopes: ActiveValue::Set(params.scopes),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Issues an access token for a client.
    ///
    /// # Arguments
    /// - `client_pk` - Primary key of the owning `oauth_clients` row
    /// - `access_token` - Token value
    /// - `expire_time` - Expiry in unix seconds, `None` for a token that never expires
    /// - `scopes` - Space separated scopes
    pub async fn create_token(
        &self,
        client_pk: i32,
        access_token: String,
        expire_time: Option<i64>,
        scopes: String,
    ) -> Result<entity::oauth_access_token::Model, DbErr> {
        entity::oauth_access_token::ActiveModel {
            access_token: ActiveValue::Set(access_token),
            oauth_client_id: ActiveValue::Set(client_pk),
            expire_time: ActiveValue::Set(expire_time),
            scopes: ActiveValue::Set(scopes),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_client(
        &self,
        client_id: &str,
    ) -> Result<Option<entity::oauth_client::Model>, DbErr> {
        entity::prelude::OauthClient::find()
            .filter(entity::oauth_client::Column::ClientId.eq(client_id))
            .one(self.db)
            .await
    }

    /// Finds a token of the client that has no expiry or expires after `now`.
    ///
    /// Prefers the token with the latest expiry; non-expiring tokens come first.
    pub async fn find_live_token(
        &self,
        client_pk: i32,
        now: i64,
    ) -> Result<Option<entity::oauth_access_token::Model>, DbErr> {
        let tokens = entity::prelude::OauthAccessToken::find()
            .filter(entity::oauth_access_token::Column::OauthClientId.eq(client_pk))
            .filter(
                Condition::any()
                    .add(entity::oauth_access_token::Column::ExpireTime.is_null())
                    .add(entity::oauth_access_token::Column::ExpireTime.gt(now)),
            )
            .all(self.db)
            .await?;

        Ok(tokens
            .into_iter()
            .max_by_key(|token| token.expire_time.unwrap_or(i64::MAX)))
    }
}
