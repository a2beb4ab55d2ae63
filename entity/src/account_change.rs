use sea_orm::entity::prelude::*;

/// Pending registration or password-reset request.
///
/// Rows are single use: the flow that redeems a key deletes the row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "account_change")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Option<i32>,
    /// `password` or `user_register`.
    #[sea_orm(column_name = "type")]
    pub change_type: String,
    /// Payload of the request, the account email for password resets.
    pub content: String,
    #[sea_orm(unique)]
    pub key: String,
    /// Expiry as a unix timestamp (seconds).
    pub time: i64,
    pub verified: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
