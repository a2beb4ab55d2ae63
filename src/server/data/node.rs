use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

pub struct NodeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NodeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::node::Model>, DbErr> {
        entity::prelude::Node::find_by_id(id).one(self.db).await
    }

    /// Fetches all nodes with the given IDs; unknown IDs are silently skipped.
    pub async fn find_by_ids(&self, ids: Vec<i32>) -> Result<Vec<entity::node::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Node::find()
            .filter(entity::node::Column::Id.is_in(ids))
            .all(self.db)
            .await
    }

    /// Lists the nodes of one location ordered by name.
    pub async fn get_by_location(
        &self,
        location_id: i32,
    ) -> Result<Vec<entity::node::Model>, DbErr> {
        entity::prelude::Node::find()
            .filter(entity::node::Column::Location.eq(location_id))
            .order_by_asc(entity::node::Column::Name)
            .all(self.db)
            .await
    }
}
