use sea_orm::entity::prelude::*;

/// Panel account.
///
/// Accounts invited through the registration flow exist before they have a
/// username or password; both are filled in when the invitation is redeemed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string.
    pub password: Option<String>,
    /// Unix timestamp (seconds), 0 until registration completes.
    pub register_time: i64,
    pub session_id: Option<String>,
    pub session_ip: Option<String>,
    pub root_admin: bool,
    pub notify_login_s: bool,
    pub notify_login_f: bool,
    pub use_totp: bool,
    /// Base32 encoded TOTP secret.
    pub totp_secret: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::server::Entity")]
    Server,
}

impl Related<super::server::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Server.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
