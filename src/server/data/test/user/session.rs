use super::*;

/// Tests storing and clearing a login session.
///
/// Verifies that `set_session` records token and IP and `clear_session` removes both.
///
/// Expected: Ok with the session fields set, then cleared
#[tokio::test]
async fn sets_and_clears_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    let updated = repo.set_session(user.id, "token123", "192.168.1.5").await?;
    assert_eq!(updated.session_id.as_deref(), Some("token123"));
    assert_eq!(updated.session_ip.as_deref(), Some("192.168.1.5"));

    let cleared = repo.clear_session(user.id).await?;
    assert!(cleared.session_id.is_none());
    assert!(cleared.session_ip.is_none());

    // Other fields are untouched
    assert_eq!(cleared.email, user.email);

    Ok(())
}
