use super::*;

/// Tests that a token can be consumed exactly once.
///
/// Expected: Ok(true) on the first call, Ok(false) afterwards
#[tokio::test]
async fn consumes_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let change = factory::account_change::create_registration_token(db, &user, "k").await?;

    let repo = AccountChangeRepository::new(db);

    assert!(repo.consume(change.id).await?);
    assert!(!repo.consume(change.id).await?);
    assert!(repo
        .find_pending("k", AccountChangeType::UserRegister, 0)
        .await?
        .is_none());

    Ok(())
}
