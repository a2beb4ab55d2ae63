use super::*;

/// Tests server list ordering.
///
/// Verifies that active servers come before inactive ones and that servers with the
/// same status keep insertion order.
///
/// Expected: Ok with active servers first
#[tokio::test]
async fn orders_active_servers_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let location = factory::create_location(db).await?;
    let node = factory::create_node(db, location.id).await?;

    let inactive = factory::server::ServerFactory::new(db, node.id, owner.id)
        .active(false)
        .build()
        .await?;
    let first = factory::create_server(db, node.id, owner.id).await?;
    let second = factory::create_server(db, node.id, owner.id).await?;

    let servers = ServerRepository::new(db).get_all_by_active().await?;
    let ids: Vec<i32> = servers.iter().map(|s| s.id).collect();

    assert_eq!(ids, vec![first.id, second.id, inactive.id]);

    Ok(())
}
