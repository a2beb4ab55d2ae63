use sea_orm::entity::prelude::*;

/// Managed game server instance.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "servers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Identifier of the server on its daemon.
    #[sea_orm(unique)]
    pub hash: String,
    /// Secret the daemon uses when calling back into the panel.
    #[sea_orm(unique)]
    pub daemon_secret: String,
    pub node: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub owner_id: i32,
    pub active: bool,
    /// Unix timestamp (seconds).
    pub date_added: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::node::Entity",
        from = "Column::Node",
        to = "super::node::Column::Id"
    )]
    Node,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::subuser::Entity")]
    Subuser,
    #[sea_orm(has_many = "super::permission::Entity")]
    Permission,
    #[sea_orm(has_many = "super::oauth_client::Entity")]
    OauthClient,
}

impl Related<super::node::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Node.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::subuser::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subuser.def()
    }
}

impl Related<super::permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Permission.def()
    }
}

impl Related<super::oauth_client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OauthClient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
