use sea_orm::EntityTrait;

use super::*;
use crate::server::data::user::UserRepository;

fn register_params(token: &str, username: &str, email: &str, password: &str) -> RegisterParams {
    RegisterParams {
        token: token.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

/// Tests completing an invited account.
///
/// Verifies that the invited user receives the username and a password that verifies,
/// and that the token is consumed so it cannot be used again.
///
/// Expected: Ok(Registered), then Ok(TokenInvalid)
#[tokio::test]
async fn registers_invited_user_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (email, _outbox) = capturing_email();

    let invited = factory::user::UserFactory::new(db)
        .email("invited@example.com")
        .invited()
        .build()
        .await?;
    factory::account_change::create_registration_token(db, &invited, "invite-token").await?;
    let service = AuthService::new(db, &email);

    let outcome = service
        .register(register_params(
            "invite-token",
            "new_player",
            "invited@example.com",
            "Secret123",
        ))
        .await?;
    assert_eq!(outcome, RegisterOutcome::Registered);

    let stored = UserRepository::new(db)
        .find_by_id(invited.id)
        .await?
        .unwrap();
    assert_eq!(stored.username.as_deref(), Some("new_player"));
    assert!(verify_password("Secret123", &stored.password.unwrap()));
    assert!(stored.register_time > 0);
    assert!(entity::prelude::AccountChange::find()
        .all(db)
        .await?
        .is_empty());

    let again = service
        .register(register_params(
            "invite-token",
            "other_player",
            "invited@example.com",
            "Secret123",
        ))
        .await?;
    assert_eq!(again, RegisterOutcome::TokenInvalid);

    Ok(())
}

/// Tests the order of the registration checks.
///
/// Verifies that the token is checked first, then the username, then the password and
/// finally uniqueness, and that a rejection leaves the token usable.
///
/// Expected: Ok with the first failing rule for each submission
#[tokio::test]
async fn reports_first_failing_rule() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (email, _outbox) = capturing_email();

    factory::user::UserFactory::new(db)
        .username("taken_name")
        .email("taken@example.com")
        .build()
        .await?;
    let invited = factory::user::UserFactory::new(db)
        .email("invited@example.com")
        .invited()
        .build()
        .await?;
    factory::account_change::create_registration_token(db, &invited, "invite-token").await?;
    let service = AuthService::new(db, &email);

    let cases = [
        (
            register_params("wrong-token", "x", "invited@example.com", "weak"),
            RegisterOutcome::TokenInvalid,
        ),
        (
            register_params("invite-token", "x", "invited@example.com", "weak"),
            RegisterOutcome::InvalidUsername,
        ),
        (
            register_params("invite-token", "new_player", "invited@example.com", "weak"),
            RegisterOutcome::WeakPassword,
        ),
        (
            register_params("invite-token", "taken_name", "invited@example.com", "Secret123"),
            RegisterOutcome::AccountExists,
        ),
        (
            register_params("invite-token", "new_player", "taken@example.com", "Secret123"),
            RegisterOutcome::AccountExists,
        ),
    ];

    for (params, expected) in cases {
        assert_eq!(service.register(params).await?, expected);
    }

    let changes = entity::prelude::AccountChange::find().all(db).await?;
    assert_eq!(changes.len(), 1);

    Ok(())
}

/// Tests an expired registration token.
///
/// Expected: Ok(TokenInvalid)
#[tokio::test]
async fn rejects_expired_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (email, _outbox) = capturing_email();

    let invited = factory::user::UserFactory::new(db).invited().build().await?;
    factory::account_change::AccountChangeFactory::new(db, "user_register", "old-token")
        .user(&invited)
        .expires(1)
        .build()
        .await?;

    let outcome = AuthService::new(db, &email)
        .register(register_params(
            "old-token",
            "new_player",
            &invited.email,
            "Secret123",
        ))
        .await?;

    assert_eq!(outcome, RegisterOutcome::TokenInvalid);

    Ok(())
}
