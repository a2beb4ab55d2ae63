use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

use super::*;
use crate::server::data::user::UserRepository;

/// Tests requesting a password reset.
///
/// Verifies that a 30 character `password` key valid for four hours is stored and
/// emailed to the account together with the client IP.
///
/// Expected: Ok(Requested)
#[tokio::test]
async fn stores_and_emails_reset_key() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (email, outbox) = capturing_email();

    let user = factory::create_user(db).await?;

    let outcome = AuthService::new(db, &email)
        .request_password_reset(&user.email, "198.51.100.4")
        .await?;
    assert_eq!(outcome, PasswordResetOutcome::Requested);

    let changes = entity::prelude::AccountChange::find().all(db).await?;
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].change_type, AccountChangeType::Password.as_str());
    assert_eq!(changes[0].key.len(), 30);
    assert_eq!(changes[0].user_id, Some(user.id));
    assert!(!changes[0].verified);
    let ttl = changes[0].time - crate::server::util::keygen::now_unix();
    assert!(ttl > 4 * 60 * 60 - 60 && ttl <= 4 * 60 * 60);

    let sent = sent(&outbox);
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].template,
        EmailTemplate::PasswordReset {
            ip: "198.51.100.4".to_string(),
            key: changes[0].key.clone(),
        }
    );

    Ok(())
}

/// Tests a reset request for an unknown address.
///
/// Expected: Ok(UnknownEmail) with no rows and no email
#[tokio::test]
async fn ignores_unknown_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (email, outbox) = capturing_email();

    let outcome = AuthService::new(db, &email)
        .request_password_reset("nobody@example.com", "198.51.100.4")
        .await?;

    assert_eq!(outcome, PasswordResetOutcome::UnknownEmail);
    assert!(entity::prelude::AccountChange::find()
        .all(db)
        .await?
        .is_empty());
    assert!(sent(&outbox).is_empty());

    Ok(())
}

/// Tests completing a password reset.
///
/// Verifies that the emailed password replaces the old one and that the key cannot be
/// used a second time.
///
/// Expected: Ok(PasswordReset), then Ok(Unverifiable)
#[tokio::test]
async fn resets_password_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (email, outbox) = capturing_email();

    let user = factory::user::UserFactory::new(db)
        .password_hash(hash_password("OldSecret1")?)
        .build()
        .await?;
    factory::account_change::AccountChangeFactory::new(db, "password", "reset-key")
        .user(&user)
        .build()
        .await?;
    let service = AuthService::new(db, &email);

    assert_eq!(
        service.verify_password_reset("reset-key").await?,
        PasswordVerifyOutcome::PasswordReset
    );

    let sent = sent(&outbox);
    assert_eq!(sent.len(), 1);
    let EmailTemplate::NewPassword { password, .. } = &sent[0].template else {
        panic!("Expected NewPassword, got: {:?}", sent[0].template);
    };
    assert_eq!(password.len(), 12);

    let stored = UserRepository::new(db).find_by_id(user.id).await?.unwrap();
    let hash = stored.password.unwrap();
    assert!(verify_password(password, &hash));
    assert!(!verify_password("OldSecret1", &hash));

    assert_eq!(
        service.verify_password_reset("reset-key").await?,
        PasswordVerifyOutcome::Unverifiable
    );

    Ok(())
}

/// Tests keys that cannot complete a reset.
///
/// Expected: Ok(Unverifiable) for expired, unknown and registration keys
#[tokio::test]
async fn rejects_expired_and_foreign_keys() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (email, outbox) = capturing_email();

    let user = factory::create_user(db).await?;
    factory::account_change::AccountChangeFactory::new(db, "password", "expired-key")
        .user(&user)
        .expires(1)
        .build()
        .await?;
    factory::account_change::create_registration_token(db, &user, "register-key").await?;
    let service = AuthService::new(db, &email);

    for key in ["expired-key", "register-key", "unknown-key"] {
        assert_eq!(
            service.verify_password_reset(key).await?,
            PasswordVerifyOutcome::Unverifiable
        );
    }
    assert!(sent(&outbox).is_empty());

    Ok(())
}

/// Tests a reset whose password update fails.
///
/// Verifies that the key is not consumed when the new password cannot be stored, so
/// the same link completes the reset once the update succeeds.
///
/// Expected: Err, then Ok(PasswordReset) with the same key
#[tokio::test]
async fn keeps_key_when_password_update_fails() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (email, outbox) = capturing_email();

    let user = factory::create_user(db).await?;
    factory::account_change::AccountChangeFactory::new(db, "password", "reset-key")
        .user(&user)
        .build()
        .await?;
    db.execute_unprepared(
        "CREATE TRIGGER reject_password BEFORE UPDATE OF password ON users \
         BEGIN SELECT RAISE(ABORT, 'password locked'); END",
    )
    .await?;
    let service = AuthService::new(db, &email);

    assert!(service.verify_password_reset("reset-key").await.is_err());
    assert_eq!(entity::prelude::AccountChange::find().count(db).await?, 1);
    assert!(UserRepository::new(db)
        .find_by_id(user.id)
        .await?
        .unwrap()
        .password
        .is_none());
    assert!(sent(&outbox).is_empty());

    db.execute_unprepared("DROP TRIGGER reject_password").await?;

    assert_eq!(
        service.verify_password_reset("reset-key").await?,
        PasswordVerifyOutcome::PasswordReset
    );
    assert_eq!(entity::prelude::AccountChange::find().count(db).await?, 0);
    assert_eq!(sent(&outbox).len(), 1);

    Ok(())
}
