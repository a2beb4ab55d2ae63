use super::*;

async fn create_panel_client(
    repo: &OAuthRepository<'_, sea_orm::DatabaseConnection>,
) -> Result<entity::oauth_client::Model, DbErr> {
    repo.create_client(CreateOAuthClientParams {
        client_id: ".panel".to_string(),
        client_secret: "secret".to_string(),
        user_id: None,
        server_id: None,
        scopes: "server.create".to_string(),
        name: "panel".to_string(),
        description: "panel".to_string(),
    })
    .await
}

/// Tests that expired tokens are skipped and the latest expiry wins.
///
/// Expected: Ok(Some) with the token expiring last
#[tokio::test]
async fn returns_latest_unexpired_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = OAuthRepository::new(db);

    let client = create_panel_client(&repo).await?;
    repo.create_token(client.id, "expired".to_string(), Some(900), String::new())
        .await?;
    repo.create_token(client.id, "soon".to_string(), Some(1_100), String::new())
        .await?;
    repo.create_token(client.id, "later".to_string(), Some(4_600), String::new())
        .await?;

    let token = repo.find_live_token(client.id, 1_000).await?;

    assert_eq!(token.map(|t| t.access_token).as_deref(), Some("later"));

    Ok(())
}

/// Tests that a token without expiry is always live.
///
/// Expected: Ok(Some) with the non-expiring token
#[tokio::test]
async fn prefers_non_expiring_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = OAuthRepository::new(db);

    let client = create_panel_client(&repo).await?;
    repo.create_token(client.id, "timed".to_string(), Some(5_000), String::new())
        .await?;
    repo.create_token(client.id, "forever".to_string(), None, String::new())
        .await?;

    let token = repo.find_live_token(client.id, 1_000).await?;

    assert_eq!(token.map(|t| t.access_token).as_deref(), Some("forever"));

    Ok(())
}

/// Tests a client whose tokens all expired.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_when_all_expired() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = OAuthRepository::new(db);

    let client = create_panel_client(&repo).await?;
    repo.create_token(client.id, "old".to_string(), Some(10), String::new())
        .await?;

    assert!(repo.find_live_token(client.id, 1_000).await?.is_none());

    Ok(())
}
