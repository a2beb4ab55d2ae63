use super::*;
use crate::server::{
    data::server::ServerRepository,
    service::server::create::{generate_unique, GeneratedColumn},
};

/// Tests a successful server creation.
///
/// Verifies that the server row is committed, the daemon receives one `PUT` with the
/// hash as name, the plugin as type and only the non-panel form fields as data, and
/// that the panel bearer token is sent.
///
/// Expected: Ok(Created)
#[tokio::test]
async fn creates_server_on_daemon() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let daemon = MockDaemon::start().await.unwrap();
    let client = daemon_client();

    let owner = factory::create_user(db).await?;
    let location = factory::create_location(db).await?;
    let node = factory::node::NodeFactory::new(db, location.id)
        .daemon(&daemon)
        .build()
        .await?;

    let outcome = ServerService::new(db, &client)
        .create(create_form(node.id, "Survival", &owner.email))
        .await?;

    let CreateServerOutcome::Created(created) = outcome else {
        panic!("Expected Created, got: {:?}", outcome);
    };
    assert_eq!(created.server.name, "Survival");
    assert_eq!(created.server.owner_id, owner.id);
    assert_eq!(created.server.node, node.id);
    assert!(created.server.active);
    assert_ne!(created.server.hash, created.server.daemon_secret);

    let puts = daemon.requests_matching(Method::PUT, "/server/");
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].path, format!("/server/{}", created.server.hash));
    assert_eq!(
        puts[0].authorization.as_deref(),
        Some(format!("Bearer {}", created.bearer.secret()).as_str())
    );

    let body = puts[0].json().unwrap();
    assert_eq!(body["name"], Value::String(created.server.hash.clone()));
    assert_eq!(body["type"], "minecraft");
    assert_eq!(body["data"], json!({ "version": "1.12.2", "memory": "1024" }));
    assert_eq!(body["environment"], json!({}));

    assert_eq!(entity::prelude::Server::find().count(db).await?, 1);

    Ok(())
}

/// Tests OAuth grants made for a new server.
///
/// Verifies that the owner and each other root admin get exactly one internal client
/// and token, and that only admins receive admin scopes.
///
/// Expected: Ok with three server-scoped clients
#[tokio::test]
async fn grants_owner_and_root_admins() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let daemon = MockDaemon::start().await.unwrap();
    let client = daemon_client();

    let owner = factory::create_user(db).await?;
    let admin_a = factory::create_root_admin(db).await?;
    let admin_b = factory::create_root_admin(db).await?;
    let location = factory::create_location(db).await?;
    let node = factory::node::NodeFactory::new(db, location.id)
        .daemon(&daemon)
        .build()
        .await?;

    let outcome = ServerService::new(db, &client)
        .create(create_form(node.id, "Creative", &owner.email))
        .await?;
    let CreateServerOutcome::Created(created) = outcome else {
        panic!("Expected Created, got: {:?}", outcome);
    };

    let clients = entity::prelude::OauthClient::find()
        .filter(entity::oauth_client::Column::ServerId.eq(created.server.id))
        .all(db)
        .await?;
    assert_eq!(clients.len(), 3);

    for user in [&owner, &admin_a, &admin_b] {
        let client = clients
            .iter()
            .find(|c| c.user_id == Some(user.id))
            .unwrap();
        assert_eq!(
            client.client_id,
            OAuthService::<sea_orm::DatabaseConnection>::internal_client_id(
                user.id,
                created.server.id
            )
        );
        assert_eq!(client.scopes.contains("server.delete"), user.root_admin);
        assert!(client.scopes.contains("server.console"));
    }

    let tokens = entity::prelude::OauthAccessToken::find()
        .filter(
            entity::oauth_access_token::Column::OauthClientId
                .is_in(clients.iter().map(|c| c.id).collect::<Vec<_>>()),
        )
        .all(db)
        .await?;
    assert_eq!(tokens.len(), 3);
    assert!(tokens.iter().all(|t| t.expire_time.is_none()));

    Ok(())
}

/// Tests an owner who is also a root admin.
///
/// Expected: Ok with a single client for the owner
#[tokio::test]
async fn admin_owner_gets_one_client() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let daemon = MockDaemon::start().await.unwrap();
    let client = daemon_client();

    let owner = factory::create_root_admin(db).await?;
    let location = factory::create_location(db).await?;
    let node = factory::node::NodeFactory::new(db, location.id)
        .daemon(&daemon)
        .build()
        .await?;

    let outcome = ServerService::new(db, &client)
        .create(create_form(node.id, "Modded", &owner.email))
        .await?;

    assert!(matches!(outcome, CreateServerOutcome::Created(_)));
    assert_eq!(server_client_count(db).await?, 1);

    Ok(())
}

/// Tests the validation rules of the create form.
///
/// Verifies that each rejection writes nothing and never reaches the daemon.
///
/// Expected: Ok(Rejected) with the matching reason
#[tokio::test]
async fn rejects_invalid_input_without_side_effects() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let daemon = MockDaemon::start().await.unwrap();
    let client = daemon_client();

    let owner = factory::create_user(db).await?;
    let location = factory::create_location(db).await?;
    let node = factory::node::NodeFactory::new(db, location.id)
        .daemon(&daemon)
        .build()
        .await?;
    factory::server::ServerFactory::new(db, node.id, owner.id)
        .name("Existing")
        .build()
        .await?;

    let service = ServerService::new(db, &client);
    let cases = [
        (
            create_form(node.id + 100, "Valid Name", &owner.email),
            CreateServerRejection::NodeNotFound,
        ),
        (
            create_form(node.id, "no/slashes", &owner.email),
            CreateServerRejection::InvalidName,
        ),
        (
            create_form(node.id, "abc", &owner.email),
            CreateServerRejection::InvalidName,
        ),
        (
            create_form(node.id, "Valid Name", "nobody@example.com"),
            CreateServerRejection::OwnerNotFound,
        ),
        (
            create_form(node.id, "Existing", &owner.email),
            CreateServerRejection::NameTaken,
        ),
    ];

    for (params, expected) in cases {
        match service.create(params).await? {
            CreateServerOutcome::Rejected(reason) => assert_eq!(reason, expected),
            other => panic!("Expected Rejected({:?}), got: {:?}", expected, other),
        }
    }

    assert_eq!(entity::prelude::Server::find().count(db).await?, 1);
    assert_eq!(server_client_count(db).await?, 0);
    assert!(daemon.requests().is_empty());

    Ok(())
}

/// Tests a daemon that refuses the new server.
///
/// Verifies that the server row and every OAuth grant are rolled back.
///
/// Expected: Ok(DaemonFailed(Rejected))
#[tokio::test]
async fn rolls_back_when_daemon_rejects() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let daemon = MockDaemon::start().await.unwrap();
    daemon.reject_create("Server already exists", "ALREADY_EXISTS");
    let client = daemon_client();

    let owner = factory::create_user(db).await?;
    factory::create_root_admin(db).await?;
    let location = factory::create_location(db).await?;
    let node = factory::node::NodeFactory::new(db, location.id)
        .daemon(&daemon)
        .build()
        .await?;

    let outcome = ServerService::new(db, &client)
        .create(create_form(node.id, "Survival", &owner.email))
        .await?;

    match outcome {
        CreateServerOutcome::DaemonFailed(DaemonError::Rejected { message, code }) => {
            assert_eq!(message, "Server already exists");
            assert_eq!(code, "ALREADY_EXISTS");
        }
        other => panic!("Expected DaemonFailed(Rejected), got: {:?}", other),
    }

    assert_eq!(entity::prelude::Server::find().count(db).await?, 0);
    assert_eq!(server_client_count(db).await?, 0);

    Ok(())
}

/// Tests a daemon that cannot be reached.
///
/// Expected: Ok(DaemonFailed(Transport)) and no server rows
#[tokio::test]
async fn rolls_back_when_daemon_unreachable() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let client = daemon_client();

    let owner = factory::create_user(db).await?;
    let location = factory::create_location(db).await?;
    let node = factory::create_node(db, location.id).await?;

    let outcome = ServerService::new(db, &client)
        .create(create_form(node.id, "Survival", &owner.email))
        .await?;

    assert!(matches!(
        outcome,
        CreateServerOutcome::DaemonFailed(DaemonError::Transport(_))
    ));
    assert_eq!(entity::prelude::Server::find().count(db).await?, 0);
    assert_eq!(server_client_count(db).await?, 0);

    Ok(())
}

/// Tests the background install call.
///
/// Verifies that `spawn_install` posts to the install endpoint without a body.
///
/// Expected: one `POST /server/{hash}/install`
#[tokio::test]
async fn install_posts_without_body() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let daemon = MockDaemon::start().await.unwrap();
    let client = daemon_client();

    let owner = factory::create_user(db).await?;
    let location = factory::create_location(db).await?;
    let node = factory::node::NodeFactory::new(db, location.id)
        .daemon(&daemon)
        .build()
        .await?;

    let service = ServerService::new(db, &client);
    let outcome = service
        .create(create_form(node.id, "Survival", &owner.email))
        .await?;
    let CreateServerOutcome::Created(created) = outcome else {
        panic!("Expected Created, got: {:?}", outcome);
    };

    service.spawn_install(&created).await.unwrap();

    let installs = daemon.requests_matching(Method::POST, "/server/");
    assert_eq!(installs.len(), 1);
    assert_eq!(
        installs[0].path,
        format!("/server/{}/install", created.server.hash)
    );
    assert!(installs[0].body.is_empty());

    Ok(())
}

/// Tests that generated values skip ones already stored.
///
/// Expected: Ok with the first candidate not in the column
#[tokio::test]
async fn generate_unique_skips_taken_values() -> Result<(), AppError> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let location = factory::create_location(db).await?;
    let node = factory::create_node(db, location.id).await?;
    factory::server::ServerFactory::new(db, node.id, owner.id)
        .hash("taken")
        .daemon_secret("also-taken")
        .build()
        .await?;

    let repo = ServerRepository::new(db);

    let mut candidates = vec!["taken", "fresh"].into_iter();
    let hash = generate_unique(&repo, GeneratedColumn::Hash, || {
        candidates.next().unwrap().to_string()
    })
    .await?;
    assert_eq!(hash, "fresh");

    // A value taken in another column is still free here
    let mut candidates = vec!["taken"].into_iter();
    let secret = generate_unique(&repo, GeneratedColumn::DaemonSecret, || {
        candidates.next().unwrap().to_string()
    })
    .await?;
    assert_eq!(secret, "taken");

    Ok(())
}
