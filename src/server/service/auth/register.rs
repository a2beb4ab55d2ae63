use sea_orm::TransactionTrait;

use crate::server::{
    data::{account_change::AccountChangeRepository, user::UserRepository},
    error::{internal::InternalError, AppError},
    model::auth::{AccountChangeType, RegisterOutcome, RegisterParams},
    service::auth::{credentials::hash_password, AuthService},
    util::{
        keygen::now_unix,
        rules::{is_valid_username, meets_password_requirements},
    },
};

impl<'a> AuthService<'a> {
    /// Completes an invited account.
    ///
    /// Requires a pending, unexpired `user_register` token, a valid username, a strong
    /// enough password and no other account using the username or email. The invited
    /// user receives the username and password and the token is consumed.
    ///
    /// # Arguments
    /// - `params` - Token and submitted account fields
    ///
    /// # Returns
    /// - `Ok(Registered)` - Account completed
    /// - `Ok(_)` - The first rule that failed; nothing was written
    /// - `Err(AppError)` - Database or hashing error
    pub async fn register(&self, params: RegisterParams) -> Result<RegisterOutcome, AppError> {
        let Some(change) = AccountChangeRepository::new(self.db)
            .find_pending(&params.token, AccountChangeType::UserRegister, now_unix())
            .await?
        else {
            return Ok(RegisterOutcome::TokenInvalid);
        };

        if !is_valid_username(&params.username) {
            return Ok(RegisterOutcome::InvalidUsername);
        }

        if !meets_password_requirements(&params.password) {
            return Ok(RegisterOutcome::WeakPassword);
        }

        if UserRepository::new(self.db)
            .username_or_email_taken(&params.username, &params.email, change.user_id)
            .await?
        {
            return Ok(RegisterOutcome::AccountExists);
        }

        let Some(user_id) = change.user_id else {
            return Err(InternalError::MissingAccountChangeUser {
                change_id: change.id,
            }
            .into());
        };

        let password_hash = hash_password(&params.password)?;

        let txn = self.db.begin().await?;

        if !AccountChangeRepository::new(&txn).consume(change.id).await? {
            return Ok(RegisterOutcome::TokenInvalid);
        }

        UserRepository::new(&txn)
            .complete_registration(user_id, params.username, password_hash, now_unix())
            .await?;

        txn.commit().await?;

        tracing::info!("User {} completed registration", user_id);

        Ok(RegisterOutcome::Registered)
    }
}
