use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an auto-deploy code for a node.
///
/// # Arguments
/// - `db` - Database connection
/// - `node` - Node the code deploys
/// - `code` - Code used in `/auth/remote/deploy/{code}`
/// - `expires` - Expiry as unix seconds
pub async fn create_autodeploy(
    db: &DatabaseConnection,
    node: i32,
    code: &str,
    expires: i64,
) -> Result<entity::autodeploy::Model, DbErr> {
    entity::autodeploy::ActiveModel {
        node: ActiveValue::Set(node),
        code: ActiveValue::Set(code.to_string()),
        expires: ActiveValue::Set(expires),
        ..Default::default()
    }
    .insert(db)
    .await
}
