use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Creates a location with a unique code.
pub async fn create_location(db: &DatabaseConnection) -> Result<entity::location::Model, DbErr> {
    let id = next_id();

    entity::location::ActiveModel {
        code: ActiveValue::Set(format!("loc{}", id)),
        name: ActiveValue::Set(format!("Location {}", id)),
        ..Default::default()
    }
    .insert(db)
    .await
}
