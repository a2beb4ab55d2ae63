use std::collections::HashMap;

use serde_json::Value;

use crate::server::{
    data::{node::NodeRepository, server::ServerRepository, user::UserRepository},
    error::AppError,
    model::{daemon::DaemonEndpoint, server::ServerListEntry},
    service::{oauth::OAuthService, server::ServerService},
};

impl<'a> ServerService<'a> {
    /// Lists every server with its owner, node and live daemon status.
    ///
    /// Servers whose owner or node is missing are left out. Each distinct daemon is
    /// queried once, in the order it first appears, for the hashes it hosts. A daemon
    /// that fails is skipped and its servers carry no `connection`.
    ///
    /// # Returns
    /// - `Ok(Vec<ServerListEntry>)` - Servers ordered active first
    /// - `Err(AppError)` - Database error
    pub async fn list(&self) -> Result<Vec<ServerListEntry>, AppError> {
        let servers = ServerRepository::new(self.db).get_all_by_active().await?;

        let mut owner_ids: Vec<i32> = servers.iter().map(|s| s.owner_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();

        let mut node_ids: Vec<i32> = servers.iter().map(|s| s.node).collect();
        node_ids.sort_unstable();
        node_ids.dedup();

        let owners: HashMap<i32, entity::user::Model> = UserRepository::new(self.db)
            .find_by_ids(owner_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        let nodes: HashMap<i32, entity::node::Model> = NodeRepository::new(self.db)
            .find_by_ids(node_ids)
            .await?
            .into_iter()
            .map(|node| (node.id, node))
            .collect();

        let mut entries: Vec<ServerListEntry> = servers
            .into_iter()
            .filter_map(|server| {
                let owner = owners.get(&server.owner_id)?.clone();
                let node = nodes.get(&server.node)?.clone();

                Some(ServerListEntry {
                    server,
                    owner,
                    node,
                    connection: None,
                })
            })
            .collect();

        if entries.is_empty() {
            return Ok(entries);
        }

        let mut statuses = self.fetch_statuses(&entries).await?;

        for entry in &mut entries {
            entry.connection = statuses.remove(&entry.server.hash);
        }

        Ok(entries)
    }

    /// Queries each distinct daemon once and merges the `hash -> status` maps.
    async fn fetch_statuses(
        &self,
        entries: &[ServerListEntry],
    ) -> Result<HashMap<String, Value>, AppError> {
        let mut groups: Vec<(DaemonEndpoint, Vec<String>)> = Vec::new();
        let mut group_index: HashMap<DaemonEndpoint, usize> = HashMap::new();

        for entry in entries {
            let endpoint = DaemonEndpoint::from_node(&entry.node);
            let index = *group_index.entry(endpoint.clone()).or_insert_with(|| {
                groups.push((endpoint, Vec::new()));
                groups.len() - 1
            });
            groups[index].1.push(entry.server.hash.clone());
        }

        let bearer = OAuthService::new(self.db).panel_access_token().await?;
        let mut statuses = HashMap::new();

        for (endpoint, hashes) in &groups {
            match self.daemon.network_status(endpoint, &bearer, hashes).await {
                Ok(status) => statuses.extend(status),
                Err(e) => tracing::debug!("Skipping status from daemon {}: {}", endpoint, e),
            }
        }

        Ok(statuses)
    }
}
