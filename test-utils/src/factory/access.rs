//! Factories for the rows that hang off a server: subusers, permissions and the
//! internal OAuth client/token pairs.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

pub async fn create_subuser(
    db: &DatabaseConnection,
    user_id: i32,
    server: i32,
) -> Result<entity::subuser::Model, DbErr> {
    entity::subuser::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        server: ActiveValue::Set(server),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn create_permission(
    db: &DatabaseConnection,
    user: i32,
    server: i32,
    permission: &str,
) -> Result<entity::permission::Model, DbErr> {
    entity::permission::ActiveModel {
        user: ActiveValue::Set(user),
        server: ActiveValue::Set(server),
        permission: ActiveValue::Set(permission.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates an internal OAuth client for `(user_id, server_id)` and one token for it.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - User the client belongs to
/// - `server_id` - Server the client grants access to
/// - `token` - Access token value
///
/// # Returns
/// - `Ok((client, token))` - Created rows
/// - `Err(DbErr)` - Database error during insert
pub async fn create_internal_client(
    db: &DatabaseConnection,
    user_id: i32,
    server_id: i32,
    token: &str,
) -> Result<
    (
        entity::oauth_client::Model,
        entity::oauth_access_token::Model,
    ),
    DbErr,
> {
    let client = entity::oauth_client::ActiveModel {
        client_id: ActiveValue::Set(format!(".internal_{}_{}", user_id, server_id)),
        client_secret: ActiveValue::Set(format!("client-secret-{}", next_id())),
        user_id: ActiveValue::Set(Some(user_id)),
        server_id: ActiveValue::Set(Some(server_id)),
        scopes: ActiveValue::Set("server.start server.stop".to_string()),
        name: ActiveValue::Set("internal_use".to_string()),
        description: ActiveValue::Set("internal_use".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let token = entity::oauth_access_token::ActiveModel {
        access_token: ActiveValue::Set(token.to_string()),
        oauth_client_id: ActiveValue::Set(client.id),
        expire_time: ActiveValue::Set(None),
        scopes: ActiveValue::Set(client.scopes.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok((client, token))
}
