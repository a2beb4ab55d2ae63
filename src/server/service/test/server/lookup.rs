use super::*;

/// Tests loading the context of an existing server.
///
/// Expected: Ok(Some) with the server's node and owner
#[tokio::test]
async fn loads_server_context() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let client = daemon_client();

    let owner = factory::create_user(db).await?;
    let location = factory::create_location(db).await?;
    let node = factory::create_node(db, location.id).await?;
    let server = factory::create_server(db, node.id, owner.id).await?;

    let service = ServerService::new(db, &client);
    let context = service.load_context(server.id).await?.unwrap();

    assert_eq!(context.server.id, server.id);
    assert_eq!(context.node.id, node.id);
    assert_eq!(context.owner.id, owner.id);
    assert!(service.load_context(server.id + 1).await?.is_none());

    Ok(())
}

/// Tests proxying a node's plugin templates.
///
/// Expected: Ok with the daemon's body unchanged
#[tokio::test]
async fn proxies_templates() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let daemon = MockDaemon::start().await.unwrap();
    let templates = json!({
        "minecraft": { "display": "Minecraft", "data": { "memory": { "value": "1024" } } }
    });
    daemon.set_templates(templates.clone());
    let client = daemon_client();

    let (_, node, _) = factory::helpers::create_server_on_daemon(db, &daemon).await?;

    let result = ServerService::new(db, &client).templates(node.id).await?;

    assert_eq!(result, templates);

    Ok(())
}

/// Tests template lookup failures.
///
/// Expected: Err(NotFound) for an unknown node, Err(DaemonErr) for an unreachable one
#[tokio::test]
async fn templates_report_missing_node_and_daemon() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let client = daemon_client();

    let location = factory::create_location(db).await?;
    let node = factory::create_node(db, location.id).await?;
    let service = ServerService::new(db, &client);

    let missing = service.templates(node.id + 1).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let unreachable = service.templates(node.id).await;
    assert!(matches!(unreachable, Err(AppError::DaemonErr(_))));

    Ok(())
}

/// Tests the node and location pickers of the create form.
///
/// Expected: Ok with the nodes of the requested location only
#[tokio::test]
async fn lists_nodes_for_location() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let client = daemon_client();

    let first = factory::create_location(db).await?;
    let second = factory::create_location(db).await?;
    let node = factory::create_node(db, first.id).await?;
    factory::create_node(db, second.id).await?;

    let service = ServerService::new(db, &client);

    assert_eq!(service.locations().await?.len(), 2);
    let nodes = service.nodes_for_location(first.id).await?;
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].id, node.id);

    Ok(())
}
