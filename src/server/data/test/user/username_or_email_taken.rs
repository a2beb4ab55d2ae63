use super::*;

/// Tests the uniqueness check used by registration.
///
/// Verifies that a clash on either username or email counts, and that the excluded
/// user (the invited account itself) is ignored.
///
/// Expected: true for clashes with other users only
#[tokio::test]
async fn detects_clashes_with_other_users() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::user::UserFactory::new(db)
        .username("existing")
        .email("existing@example.com")
        .build()
        .await?;
    let invited = factory::user::UserFactory::new(db)
        .email("invited@example.com")
        .invited()
        .build()
        .await?;

    let repo = UserRepository::new(db);

    assert!(
        repo.username_or_email_taken("existing", "new@example.com", Some(invited.id))
            .await?
    );
    assert!(
        repo.username_or_email_taken("newname", "existing@example.com", Some(invited.id))
            .await?
    );
    assert!(
        !repo
            .username_or_email_taken("newname", "invited@example.com", Some(invited.id))
            .await?
    );
    assert!(
        repo.username_or_email_taken("newname", "invited@example.com", Some(existing.id))
            .await?
    );

    Ok(())
}
