use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::auth::{LoginOutcome, LoginParams},
    service::{
        auth::{
            credentials::{verify_password, verify_totp},
            AuthService, SESSION_TOKEN_LENGTH,
        },
        email::EmailTemplate,
    },
    util::keygen::keygen,
};

impl<'a> AuthService<'a> {
    /// Checks credentials and opens a session.
    ///
    /// On a wrong password the account is notified when it opted into failure
    /// notifications. TOTP is required when the account enabled it. A successful login
    /// stores a fresh 12 character token and the client IP on the user.
    ///
    /// # Arguments
    /// - `params` - Submitted email, password, optional TOTP code and client IP
    ///
    /// # Returns
    /// - `Ok(Authenticated)` - Session token for the `pp_auth_token` cookie
    /// - `Ok(InvalidCredentials)` / `Ok(InvalidTotp)` - Login refused
    /// - `Err(AppError)` - Database or TOTP secret error
    pub async fn login(&self, params: LoginParams) -> Result<LoginOutcome, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_email(&params.email).await? else {
            return Ok(LoginOutcome::InvalidCredentials);
        };

        let password_ok = user
            .password
            .as_deref()
            .is_some_and(|hash| verify_password(&params.password, hash));

        if !password_ok {
            if user.notify_login_f {
                self.email.dispatch(
                    &user.email,
                    EmailTemplate::LoginFailed {
                        ip: params.ip.clone(),
                    },
                );
            }

            tracing::debug!("Failed login for user {}", user.id);
            return Ok(LoginOutcome::InvalidCredentials);
        }

        if user.use_totp {
            let valid = match (user.totp_secret.as_deref(), params.totp_token.as_deref()) {
                (Some(secret), Some(token)) => verify_totp(secret, token, &user.email)?,
                _ => false,
            };

            if !valid {
                return Ok(LoginOutcome::InvalidTotp);
            }
        }

        let session_token = keygen(SESSION_TOKEN_LENGTH);
        user_repo
            .set_session(user.id, &session_token, &params.ip)
            .await?;

        if user.notify_login_s {
            self.email
                .dispatch(&user.email, EmailTemplate::LoginSucceeded { ip: params.ip });
        }

        tracing::info!("User {} logged in", user.id);

        Ok(LoginOutcome::Authenticated { session_token })
    }

    /// Whether the account behind `email` requires a TOTP code.
    pub async fn totp_enabled(&self, email: &str) -> Result<bool, AppError> {
        let user = UserRepository::new(self.db).find_by_email(email).await?;

        Ok(user.is_some_and(|user| user.use_totp))
    }

    /// Clears the user's session fields.
    pub async fn logout(&self, user_id: i32) -> Result<(), AppError> {
        UserRepository::new(self.db).clear_session(user_id).await?;

        tracing::info!("User {} logged out", user_id);
        Ok(())
    }
}
