use sea_orm::{ConnectionTrait, DbErr, TransactionTrait};
use serde_json::Map;
use tokio::task::JoinHandle;

use crate::server::{
    data::{node::NodeRepository, server::ServerRepository, user::UserRepository},
    error::AppError,
    model::{
        daemon::{CreateDaemonServer, DaemonEndpoint},
        server::{
            CreateServerOutcome, CreateServerParams, CreateServerRecord, CreateServerRejection,
            CreatedServer,
        },
    },
    service::{oauth::OAuthService, server::ServerService},
    util::{
        keygen::{now_unix, uuid},
        rules::is_valid_server_name,
    },
};

/// Server columns whose values are generated and must be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedColumn {
    Hash,
    DaemonSecret,
}

/// Draws candidates from `generate` until one is unused in `column`.
///
/// # Arguments
/// - `repo` - Repository bound to the connection or transaction the row will be inserted on
/// - `column` - Column the value is checked against
/// - `generate` - Candidate source
///
/// # Returns
/// - `Ok(String)` - A value not present in the column
/// - `Err(DbErr)` - Database error during a lookup
pub async fn generate_unique<C, G>(
    repo: &ServerRepository<'_, C>,
    column: GeneratedColumn,
    mut generate: G,
) -> Result<String, DbErr>
where
    C: ConnectionTrait,
    G: FnMut() -> String,
{
    loop {
        let candidate = generate();

        let taken = match column {
            GeneratedColumn::Hash => repo.hash_exists(&candidate).await?,
            GeneratedColumn::DaemonSecret => repo.daemon_secret_exists(&candidate).await?,
        };

        if !taken {
            return Ok(candidate);
        }

        tracing::debug!("Generated {:?} collided, retrying", column);
    }
}

impl<'a> ServerService<'a> {
    /// Creates a server locally and on its node's daemon.
    ///
    /// Validation runs first and writes nothing. The server row and the OAuth grants
    /// are then inserted in one transaction that is committed only when the daemon
    /// accepts `PUT /server/{hash}`.
    ///
    /// # Arguments
    /// - `params` - Parsed form values
    ///
    /// # Returns
    /// - `Ok(Created)` - Server committed; the caller should start the install
    /// - `Ok(Rejected)` - Validation failed, nothing was written
    /// - `Ok(DaemonFailed)` - The daemon refused or was unreachable, everything was rolled back
    /// - `Err(AppError)` - Database error
    pub async fn create(&self, params: CreateServerParams) -> Result<CreateServerOutcome, AppError> {
        let node = match params.node_id {
            Some(node_id) => NodeRepository::new(self.db).find_by_id(node_id).await?,
            None => None,
        };
        let Some(node) = node else {
            return Ok(CreateServerOutcome::Rejected(
                CreateServerRejection::NodeNotFound,
            ));
        };

        if !is_valid_server_name(&params.name) {
            return Ok(CreateServerOutcome::Rejected(
                CreateServerRejection::InvalidName,
            ));
        }

        let user_repo = UserRepository::new(self.db);
        let Some(owner) = user_repo.find_by_email(&params.owner_email).await? else {
            return Ok(CreateServerOutcome::Rejected(
                CreateServerRejection::OwnerNotFound,
            ));
        };

        if ServerRepository::new(self.db)
            .name_exists(&params.name)
            .await?
        {
            return Ok(CreateServerOutcome::Rejected(CreateServerRejection::NameTaken));
        }

        let bearer = OAuthService::new(self.db).panel_access_token().await?;
        let root_admins = user_repo.get_root_admins().await?;

        // Dropping the transaction on an early return rolls it back.
        let txn = self.db.begin().await?;
        let server_repo = ServerRepository::new(&txn);

        let hash = generate_unique(&server_repo, GeneratedColumn::Hash, uuid).await?;
        let daemon_secret =
            generate_unique(&server_repo, GeneratedColumn::DaemonSecret, uuid).await?;

        let server = server_repo
            .create(CreateServerRecord {
                hash,
                daemon_secret,
                node: node.id,
                name: params.name,
                owner_id: owner.id,
                date_added: now_unix(),
            })
            .await?;

        OAuthService::new(&txn)
            .grant_server_access(&owner, server.id, &root_admins)
            .await?;

        let payload = CreateDaemonServer {
            name: server.hash.clone(),
            plugin: params.plugin,
            data: params.data,
            environment: Map::new(),
        };

        let endpoint = DaemonEndpoint::from_node(&node);
        match self
            .daemon
            .create_server(&endpoint, &bearer, &server.hash, &payload)
            .await
        {
            Ok(()) => {
                txn.commit().await?;

                tracing::info!(
                    "Created server {} ({}) on node {}",
                    server.name,
                    server.hash,
                    node.name
                );

                Ok(CreateServerOutcome::Created(CreatedServer {
                    server,
                    node,
                    bearer,
                }))
            }
            Err(e) => {
                txn.rollback().await?;

                tracing::warn!("Daemon at {} refused server creation: {}", endpoint, e);

                Ok(CreateServerOutcome::DaemonFailed(e))
            }
        }
    }

    /// Starts the install of a created server in the background.
    ///
    /// Failures are logged and never touch the committed server.
    pub fn spawn_install(&self, created: &CreatedServer) -> JoinHandle<()> {
        let daemon = self.daemon.clone();
        let endpoint = DaemonEndpoint::from_node(&created.node);
        let bearer = created.bearer.clone();
        let hash = created.server.hash.clone();

        tokio::spawn(async move {
            if let Err(e) = daemon.install_server(&endpoint, &bearer, &hash).await {
                tracing::warn!("Install of server {} on {} failed: {}", hash, endpoint, e);
            }
        })
    }
}
