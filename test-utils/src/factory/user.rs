//! User factory for creating test user entities.
//!
//! Users are created as fully registered accounts by default. Use `invited()` for
//! the username-less, password-less rows the registration flow completes.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let admin = UserFactory::new(&db)
///     .email("admin@example.com")
///     .root_admin(true)
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    username: Option<String>,
    email: String,
    password_hash: Option<String>,
    register_time: i64,
    session: Option<(String, String)>,
    root_admin: bool,
    notify_login_s: bool,
    notify_login_f: bool,
    totp_secret: Option<String>,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - username: `"user_{id}"`
    /// - email: `"user{id}@example.com"`
    /// - password: none
    /// - root_admin: `false`
    /// - notifications and TOTP: off
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `UserFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            username: Some(format!("user_{}", id)),
            email: format!("user{}@example.com", id),
            password_hash: None,
            register_time: 1_700_000_000,
            session: None,
            root_admin: false,
            notify_login_s: false,
            notify_login_f: false,
            totp_secret: None,
        }
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the stored password hash. Hash the plain password before passing it in.
    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    /// Marks the user as invited: no username, no password, not yet registered.
    pub fn invited(mut self) -> Self {
        self.username = None;
        self.password_hash = None;
        self.register_time = 0;
        self
    }

    /// Gives the user a login session bound to `ip`.
    ///
    /// # Arguments
    /// - `token` - Value the `pp_auth_token` cookie must carry
    /// - `ip` - Address the session is bound to
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn session(mut self, token: impl Into<String>, ip: impl Into<String>) -> Self {
        self.session = Some((token.into(), ip.into()));
        self
    }

    pub fn root_admin(mut self, root_admin: bool) -> Self {
        self.root_admin = root_admin;
        self
    }

    pub fn notify_login_success(mut self, notify: bool) -> Self {
        self.notify_login_s = notify;
        self
    }

    pub fn notify_login_failure(mut self, notify: bool) -> Self {
        self.notify_login_f = notify;
        self
    }

    /// Enables TOTP with the given base32 secret.
    pub fn totp_secret(mut self, secret: impl Into<String>) -> Self {
        self.totp_secret = Some(secret.into());
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let (session_id, session_ip) = match self.session {
            Some((token, ip)) => (Some(token), Some(ip)),
            None => (None, None),
        };

        entity::user::ActiveModel {
            username: ActiveValue::Set(self.username),
            email: ActiveValue::Set(self.email),
            password: ActiveValue::Set(self.password_hash),
            register_time: ActiveValue::Set(self.register_time),
            session_id: ActiveValue::Set(session_id),
            session_ip: ActiveValue::Set(session_ip),
            root_admin: ActiveValue::Set(self.root_admin),
            notify_login_s: ActiveValue::Set(self.notify_login_s),
            notify_login_f: ActiveValue::Set(self.notify_login_f),
            use_totp: ActiveValue::Set(self.totp_secret.is_some()),
            totp_secret: ActiveValue::Set(self.totp_secret),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a regular, registered user with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates a root administrator with default values.
pub async fn create_root_admin(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).root_admin(true).build().await
}
