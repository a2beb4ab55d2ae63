//! Admin access guard.
//!
//! A user is logged in when the `pp_auth_token` cookie matches their `session_id` and
//! the request comes from the `session_ip` recorded at login.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::client_ip::ClientIp,
    state::AppState,
    util::cookie,
};

pub enum Permission {
    RootAdmin,
}

/// The user that passed the guard, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub entity::user::Model);

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    jar: &'a CookieJar,
    ip: &'a ClientIp,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, jar: &'a CookieJar, ip: &'a ClientIp) -> Self {
        Self { db, jar, ip }
    }

    /// Resolves the logged-in user, if any.
    ///
    /// # Returns
    /// - `Ok(Some(user))` - Cookie matches a session bound to this IP
    /// - `Ok(None)` - No cookie or no matching session
    /// - `Err(AppError::DbErr(_))` - Database error during lookup
    pub async fn current_user(&self) -> Result<Option<entity::user::Model>, AppError> {
        let Some(token) = self.jar.get(cookie::AUTH_TOKEN) else {
            return Ok(None);
        };

        if token.value().is_empty() {
            return Ok(None);
        }

        let user = UserRepository::new(self.db)
            .find_by_session(token.value(), &self.ip.0)
            .await?;

        Ok(user)
    }

    /// Requires a logged-in user holding every listed permission.
    ///
    /// # Arguments
    /// - `permissions` - Permissions the user must hold
    ///
    /// # Returns
    /// - `Ok(user)` - The logged-in user
    /// - `Err(AuthError::NotLoggedIn)` - No valid session
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    pub async fn require(
        &self,
        permissions: &[Permission],
    ) -> Result<entity::user::Model, AppError> {
        let Some(user) = self.current_user().await? else {
            return Err(AuthError::NotLoggedIn.into());
        };

        for permission in permissions {
            match permission {
                Permission::RootAdmin => {
                    if !user.root_admin {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "User attempted to access the admin area without root admin permissions"
                                .to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }
}

/// Route layer for `/admin/*`: only root admins get through.
pub async fn require_root_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    ip: ClientIp,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = AuthGuard::new(&state.db, &jar, &ip)
        .require(&[Permission::RootAdmin])
        .await?;

    request.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(request).await)
}
