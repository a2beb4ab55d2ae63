use super::*;

/// Tests creating a server row.
///
/// Verifies that the repository stores every field of the record and marks the
/// new server active.
///
/// Expected: Ok with the stored server
#[tokio::test]
async fn creates_active_server() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let location = factory::create_location(db).await?;
    let node = factory::create_node(db, location.id).await?;

    let server = ServerRepository::new(db)
        .create(CreateServerRecord {
            hash: "0b6f5c1e-hash".to_string(),
            daemon_secret: "d41e-secret".to_string(),
            node: node.id,
            name: "Survival".to_string(),
            owner_id: owner.id,
            date_added: 1_750_000_000,
        })
        .await?;

    assert_eq!(server.hash, "0b6f5c1e-hash");
    assert_eq!(server.daemon_secret, "d41e-secret");
    assert_eq!(server.node, node.id);
    assert_eq!(server.owner_id, owner.id);
    assert_eq!(server.date_added, 1_750_000_000);
    assert!(server.active);

    Ok(())
}

/// Tests that a duplicate hash is rejected by the store.
///
/// Expected: Err(DbErr) on the second insert
#[tokio::test]
async fn rejects_duplicate_hash() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let location = factory::create_location(db).await?;
    let node = factory::create_node(db, location.id).await?;
    let repo = ServerRepository::new(db);

    let record = |name: &str, secret: &str| CreateServerRecord {
        hash: "same-hash".to_string(),
        daemon_secret: secret.to_string(),
        node: node.id,
        name: name.to_string(),
        owner_id: owner.id,
        date_added: 0,
    };

    repo.create(record("First", "secret-1")).await?;
    let result = repo.create(record("Second", "secret-2")).await;

    assert!(result.is_err());

    Ok(())
}
