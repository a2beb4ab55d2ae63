use super::*;

/// Tests deleting a server with every dependent row.
///
/// Verifies that subusers, permissions, OAuth tokens and OAuth clients of the server
/// are removed along with the server row itself.
///
/// Expected: Ok(1) and no rows left for the server
#[tokio::test]
async fn deletes_server_and_access_rows() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let location = factory::create_location(db).await?;
    let node = factory::create_node(db, location.id).await?;
    let server = factory::create_server(db, node.id, owner.id).await?;

    let subuser = factory::create_user(db).await?;
    factory::access::create_subuser(db, subuser.id, server.id).await?;
    factory::access::create_permission(db, subuser.id, server.id, "server.console").await?;
    factory::access::create_internal_client(db, owner.id, server.id, "owner-token").await?;
    factory::access::create_internal_client(db, subuser.id, server.id, "subuser-token").await?;

    let deleted = ServerRepository::new(db)
        .delete_with_access(server.id)
        .await?;

    assert_eq!(deleted, 1);
    assert_eq!(entity::prelude::Server::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Subuser::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Permission::find().count(db).await?, 0);
    assert_eq!(entity::prelude::OauthClient::find().count(db).await?, 0);
    assert_eq!(entity::prelude::OauthAccessToken::find().count(db).await?, 0);

    Ok(())
}

/// Tests that rows belonging to other servers survive.
///
/// Expected: Ok with the other server's client, token and subuser intact
#[tokio::test]
async fn leaves_other_servers_untouched() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let location = factory::create_location(db).await?;
    let node = factory::create_node(db, location.id).await?;
    let doomed = factory::create_server(db, node.id, owner.id).await?;
    let kept = factory::create_server(db, node.id, owner.id).await?;

    factory::access::create_internal_client(db, owner.id, doomed.id, "doomed-token").await?;
    factory::access::create_internal_client(db, owner.id, kept.id, "kept-token").await?;
    factory::access::create_subuser(db, owner.id, kept.id).await?;

    ServerRepository::new(db)
        .delete_with_access(doomed.id)
        .await?;

    let servers = entity::prelude::Server::find().all(db).await?;
    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0].id, kept.id);

    let tokens = entity::prelude::OauthAccessToken::find().all(db).await?;
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].access_token, "kept-token");
    assert_eq!(entity::prelude::Subuser::find().count(db).await?, 1);

    Ok(())
}

/// Tests deleting a server that does not exist.
///
/// Expected: Ok(0)
#[tokio::test]
async fn returns_zero_for_unknown_server() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deleted = ServerRepository::new(db).delete_with_access(999).await?;

    assert_eq!(deleted, 0);

    Ok(())
}
