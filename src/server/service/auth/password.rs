use sea_orm::TransactionTrait;

use crate::server::{
    data::{account_change::AccountChangeRepository, user::UserRepository},
    error::{internal::InternalError, AppError},
    model::auth::{
        AccountChangeType, CreateAccountChangeParams, PasswordResetOutcome, PasswordVerifyOutcome,
    },
    service::{
        auth::{
            credentials::hash_password, AuthService, RESET_KEY_LENGTH, RESET_KEY_TTL_SECS,
            SESSION_TOKEN_LENGTH,
        },
        email::EmailTemplate,
    },
    util::keygen::{keygen, now_unix},
};

impl<'a> AuthService<'a> {
    /// Starts password recovery for an email address.
    ///
    /// Creates a `password` account change with a 30 character key that expires in four
    /// hours and emails the key to the account.
    ///
    /// # Arguments
    /// - `email` - Submitted address
    /// - `ip` - Client address, included in the email
    ///
    /// # Returns
    /// - `Ok(Requested)` - Key created and emailed
    /// - `Ok(UnknownEmail)` - No account uses that address
    /// - `Err(AppError)` - Database error
    pub async fn request_password_reset(
        &self,
        email: &str,
        ip: &str,
    ) -> Result<PasswordResetOutcome, AppError> {
        let Some(user) = UserRepository::new(self.db).find_by_email(email).await? else {
            return Ok(PasswordResetOutcome::UnknownEmail);
        };

        let key = keygen(RESET_KEY_LENGTH);

        AccountChangeRepository::new(self.db)
            .create(CreateAccountChangeParams {
                user_id: Some(user.id),
                change_type: AccountChangeType::Password,
                content: user.email.clone(),
                key: key.clone(),
                expires: now_unix() + RESET_KEY_TTL_SECS,
            })
            .await?;

        self.email.dispatch(
            &user.email,
            EmailTemplate::PasswordReset {
                ip: ip.to_string(),
                key,
            },
        );

        Ok(PasswordResetOutcome::Requested)
    }

    /// Completes password recovery.
    ///
    /// A pending, unexpired `password` key sets a new random 12 character password and
    /// is consumed in the same transaction; the new password is emailed after commit.
    ///
    /// # Returns
    /// - `Ok(PasswordReset)` - Password replaced and emailed
    /// - `Ok(Unverifiable)` - Unknown, consumed or expired key
    /// - `Err(AppError)` - Database error
    pub async fn verify_password_reset(&self, key: &str) -> Result<PasswordVerifyOutcome, AppError> {
        let change_repo = AccountChangeRepository::new(self.db);

        let Some(change) = change_repo
            .find_pending(key, AccountChangeType::Password, now_unix())
            .await?
        else {
            return Ok(PasswordVerifyOutcome::Unverifiable);
        };

        let user_repo = UserRepository::new(self.db);
        let user = match change.user_id {
            Some(user_id) => user_repo.find_by_id(user_id).await?,
            None => user_repo.find_by_email(&change.content).await?,
        };
        let Some(user) = user else {
            return Err(InternalError::MissingAccountChangeUser {
                change_id: change.id,
            }
            .into());
        };

        let password = keygen(SESSION_TOKEN_LENGTH);
        let password_hash = hash_password(&password)?;

        // Dropping the transaction on an early return rolls it back.
        let txn = self.db.begin().await?;

        if !AccountChangeRepository::new(&txn).consume(change.id).await? {
            return Ok(PasswordVerifyOutcome::Unverifiable);
        }

        UserRepository::new(&txn)
            .set_password(user.id, password_hash)
            .await?;

        txn.commit().await?;

        self.email.dispatch(
            &user.email,
            EmailTemplate::NewPassword {
                email: user.email.clone(),
                password,
            },
        );

        tracing::info!("Password reset completed for user {}", user.id);

        Ok(PasswordVerifyOutcome::PasswordReset)
    }
}
