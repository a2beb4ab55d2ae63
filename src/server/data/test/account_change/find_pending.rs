use super::*;

/// Tests finding a pending, unexpired token of the right type.
///
/// Expected: Ok(Some) for the pending token
#[tokio::test]
async fn finds_pending_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let change = factory::account_change::AccountChangeFactory::new(db, "password", "reset-key")
        .user(&user)
        .expires(2_000)
        .build()
        .await?;

    let found = AccountChangeRepository::new(db)
        .find_pending("reset-key", AccountChangeType::Password, 1_000)
        .await?;

    assert_eq!(found.map(|c| c.id), Some(change.id));

    Ok(())
}

/// Tests that expired, verified and mistyped tokens are not pending.
///
/// Expected: Ok(None) in every case
#[tokio::test]
async fn ignores_expired_verified_and_other_types() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::account_change::AccountChangeFactory::new(db, "password", "expired")
        .user(&user)
        .expires(999)
        .build()
        .await?;
    factory::account_change::AccountChangeFactory::new(db, "password", "verified")
        .user(&user)
        .verified(true)
        .build()
        .await?;
    factory::account_change::create_registration_token(db, &user, "register-key").await?;

    let repo = AccountChangeRepository::new(db);

    assert!(repo
        .find_pending("expired", AccountChangeType::Password, 1_000)
        .await?
        .is_none());
    assert!(repo
        .find_pending("verified", AccountChangeType::Password, 1_000)
        .await?
        .is_none());
    assert!(repo
        .find_pending("register-key", AccountChangeType::Password, 1_000)
        .await?
        .is_none());
    assert!(repo
        .find_pending("register-key", AccountChangeType::UserRegister, 1_000)
        .await?
        .is_some());

    Ok(())
}
