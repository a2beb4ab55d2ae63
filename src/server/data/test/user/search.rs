use super::*;

/// Tests account search over email and username.
///
/// Expected: Ok with every user whose email or username contains the query
#[tokio::test]
async fn matches_email_or_username() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let by_email = factory::user::UserFactory::new(db)
        .email("steve@minecraft.example")
        .username("builder")
        .build()
        .await?;
    let by_username = factory::user::UserFactory::new(db)
        .email("alex@example.com")
        .username("steve_the_second")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .email("herobrine@example.com")
        .username("herobrine")
        .build()
        .await?;

    let results = UserRepository::new(db).search("steve").await?;
    let mut ids: Vec<i32> = results.iter().map(|u| u.id).collect();
    ids.sort();

    assert_eq!(ids, vec![by_email.id, by_username.id]);

    Ok(())
}

/// Tests a search without matches.
///
/// Expected: Ok(empty)
#[tokio::test]
async fn returns_empty_without_matches() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;

    let results = UserRepository::new(db).search("nobody-here").await?;

    assert!(results.is_empty());

    Ok(())
}
