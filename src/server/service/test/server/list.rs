use super::*;

/// Tests listing servers across healthy and failing daemons.
///
/// Verifies that each daemon is asked once for its own hashes, that statuses are
/// attached to the healthy daemon's servers and that servers on a failing daemon are
/// still listed without a connection.
///
/// Expected: Ok with every server, only the healthy ones carrying status
#[tokio::test]
async fn attaches_status_from_reachable_daemons() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let healthy = MockDaemon::start().await.unwrap();
    let failing = MockDaemon::start().await.unwrap();
    failing.reject_network("Daemon is shutting down", "SHUTDOWN");
    let client = daemon_client();

    let (_, _, healthy_server) = factory::helpers::create_server_on_daemon(db, &healthy).await?;
    let (_, _, failing_server) = factory::helpers::create_server_on_daemon(db, &failing).await?;

    let owner = factory::create_user(db).await?;
    let location = factory::create_location(db).await?;
    let unreachable = factory::create_node(db, location.id).await?;
    let offline_server = factory::create_server(db, unreachable.id, owner.id).await?;

    healthy.set_status(&healthy_server.hash, json!({ "status": "online" }));

    let entries = ServerService::new(db, &client).list().await?;

    assert_eq!(entries.len(), 3);
    for entry in &entries {
        if entry.server.id == healthy_server.id {
            assert_eq!(entry.connection, Some(json!({ "status": "online" })));
        } else {
            assert!(entry.connection.is_none());
        }
    }
    assert!(entries.iter().any(|e| e.server.id == failing_server.id));
    assert!(entries.iter().any(|e| e.server.id == offline_server.id));

    let network = healthy.requests_matching(Method::GET, "/network");
    assert_eq!(network.len(), 1);
    assert_eq!(
        network[0].query_value("ids"),
        Some(healthy_server.hash.as_str())
    );
    assert!(network[0]
        .authorization
        .as_deref()
        .is_some_and(|auth| auth.starts_with("Bearer ")));

    Ok(())
}

/// Tests that servers sharing a daemon are queried together.
///
/// Expected: one `/network` request listing both hashes
#[tokio::test]
async fn groups_servers_by_daemon() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let daemon = MockDaemon::start().await.unwrap();
    let client = daemon_client();

    let (owner, node, first) = factory::helpers::create_server_on_daemon(db, &daemon).await?;
    let second = factory::create_server(db, node.id, owner.id).await?;

    ServerService::new(db, &client).list().await?;

    let network = daemon.requests_matching(Method::GET, "/network");
    assert_eq!(network.len(), 1);
    assert_eq!(
        network[0].query_value("ids"),
        Some(format!("{},{}", first.hash, second.hash).as_str())
    );

    Ok(())
}

/// Tests listing without servers.
///
/// Expected: Ok(empty) and no daemon calls
#[tokio::test]
async fn empty_list_skips_daemons() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let client = daemon_client();

    let entries = ServerService::new(db, &client).list().await?;

    assert!(entries.is_empty());

    Ok(())
}
