use serde_json::Value;

use crate::server::{
    data::{
        location::LocationRepository, node::NodeRepository, server::ServerRepository,
        user::UserRepository,
    },
    error::{internal::InternalError, AppError},
    model::{daemon::DaemonEndpoint, server::ServerContext},
    service::{oauth::OAuthService, server::ServerService},
};

impl<'a> ServerService<'a> {
    /// Loads a server with its node and owner.
    ///
    /// # Returns
    /// - `Ok(Some(ServerContext))` - Server found
    /// - `Ok(None)` - No server with that ID
    /// - `Err(AppError::InternalErr)` - The server's owner or node is missing
    pub async fn load_context(&self, server_id: i32) -> Result<Option<ServerContext>, AppError> {
        let Some(server) = ServerRepository::new(self.db).find_by_id(server_id).await? else {
            return Ok(None);
        };

        let Some(owner) = UserRepository::new(self.db)
            .find_by_id(server.owner_id)
            .await?
        else {
            return Err(InternalError::MissingServerOwner {
                server_id: server.id,
                owner_id: server.owner_id,
            }
            .into());
        };

        let Some(node) = NodeRepository::new(self.db).find_by_id(server.node).await? else {
            return Err(InternalError::MissingServerNode {
                server_id: server.id,
                node_id: server.node,
            }
            .into());
        };

        Ok(Some(ServerContext {
            server,
            node,
            owner,
        }))
    }

    /// Users whose email or username contains `query`.
    pub async fn search_accounts(&self, query: &str) -> Result<Vec<entity::user::Model>, AppError> {
        Ok(UserRepository::new(self.db).search(query).await?)
    }

    pub async fn locations(&self) -> Result<Vec<entity::location::Model>, AppError> {
        Ok(LocationRepository::new(self.db).get_all().await?)
    }

    pub async fn nodes_for_location(
        &self,
        location_id: i32,
    ) -> Result<Vec<entity::node::Model>, AppError> {
        Ok(NodeRepository::new(self.db)
            .get_by_location(location_id)
            .await?)
    }

    /// Proxies the plugin templates of a node's daemon.
    ///
    /// # Returns
    /// - `Ok(Value)` - The daemon's JSON body, untouched
    /// - `Err(AppError::NotFound)` - Unknown node
    /// - `Err(AppError::DaemonErr)` - Daemon unreachable or body unreadable
    pub async fn templates(&self, node_id: i32) -> Result<Value, AppError> {
        let Some(node) = NodeRepository::new(self.db).find_by_id(node_id).await? else {
            return Err(AppError::NotFound(format!("Node {} not found", node_id)));
        };

        let bearer = OAuthService::new(self.db).panel_access_token().await?;
        let templates = self
            .daemon
            .templates(&DaemonEndpoint::from_node(&node), &bearer)
            .await?;

        Ok(templates)
    }
}
