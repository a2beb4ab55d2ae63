use super::*;

/// Tests rendering the install script for a valid auto-deploy code.
///
/// Expected: Ok(Some) with a script for the code's node
#[tokio::test]
async fn renders_script_for_valid_code() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (email, _outbox) = capturing_email();

    let location = factory::create_location(db).await?;
    let node = factory::node::NodeFactory::new(db, location.id)
        .address("10.0.0.5", 5656)
        .build()
        .await?;
    factory::autodeploy::create_autodeploy(db, node.id, "deploy-code", i64::from(i32::MAX))
        .await?;

    let script = AuthService::new(db, &email)
        .deploy_script("deploy-code", "https://panel.example.com", "v1.2.0")
        .await?
        .unwrap();

    assert!(script.starts_with("#!/bin/bash"));
    assert!(script.contains(r#"NODE_IP="10.0.0.5""#));
    assert!(script.contains(&format!(r#"NODE_ID="{}""#, node.id)));

    Ok(())
}

/// Tests codes that do not resolve to a script.
///
/// Expected: Ok(None) for expired and unknown codes
#[tokio::test]
async fn rejects_expired_and_unknown_codes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (email, _outbox) = capturing_email();

    let location = factory::create_location(db).await?;
    let node = factory::create_node(db, location.id).await?;
    factory::autodeploy::create_autodeploy(db, node.id, "expired-code", 1).await?;
    let service = AuthService::new(db, &email);

    assert!(service
        .deploy_script("expired-code", "https://panel.example.com", "v1.2.0")
        .await?
        .is_none());
    assert!(service
        .deploy_script("unknown-code", "https://panel.example.com", "v1.2.0")
        .await?
        .is_none());

    Ok(())
}
