use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

pub struct AutodeployRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AutodeployRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds a deploy code that expires after `now` (unix seconds).
    pub async fn find_valid(
        &self,
        code: &str,
        now: i64,
    ) -> Result<Option<entity::autodeploy::Model>, DbErr> {
        entity::prelude::Autodeploy::find()
            .filter(entity::autodeploy::Column::Code.eq(code))
            .filter(entity::autodeploy::Column::Expires.gt(now))
            .one(self.db)
            .await
    }
}
