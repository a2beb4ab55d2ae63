use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for `account_change` rows.
pub struct AccountChangeFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: Option<i32>,
    change_type: String,
    content: String,
    key: String,
    expires: i64,
    verified: bool,
}

impl<'a> AccountChangeFactory<'a> {
    /// Defaults to an unverified row that expires far in the future.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `change_type` - `password` or `user_register`
    /// - `key` - Token value
    pub fn new(db: &'a DatabaseConnection, change_type: &str, key: impl Into<String>) -> Self {
        Self {
            db,
            user_id: None,
            change_type: change_type.to_string(),
            content: String::new(),
            key: key.into(),
            expires: i64::from(i32::MAX),
            verified: false,
        }
    }

    pub fn user(mut self, user: &entity::user::Model) -> Self {
        self.user_id = Some(user.id);
        self.content = user.email.clone();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets the expiry as unix seconds.
    pub fn expires(mut self, expires: i64) -> Self {
        self.expires = expires;
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    pub async fn build(self) -> Result<entity::account_change::Model, DbErr> {
        entity::account_change::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            change_type: ActiveValue::Set(self.change_type),
            content: ActiveValue::Set(self.content),
            key: ActiveValue::Set(self.key),
            time: ActiveValue::Set(self.expires),
            verified: ActiveValue::Set(self.verified),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending registration token for an invited user.
pub async fn create_registration_token(
    db: &DatabaseConnection,
    user: &entity::user::Model,
    key: &str,
) -> Result<entity::account_change::Model, DbErr> {
    AccountChangeFactory::new(db, "user_register", key)
        .user(user)
        .build()
        .await
}
