use crate::server::{
    data::{autodeploy::AutodeployRepository, node::NodeRepository},
    error::AppError,
    service::auth::AuthService,
    util::keygen::now_unix,
};

impl<'a> AuthService<'a> {
    /// Renders the daemon install script for the node behind an auto-deploy code.
    ///
    /// # Arguments
    /// - `code` - Auto-deploy code from the URL
    /// - `app_url` - Public panel URL the daemon registers with
    /// - `pufferd_version` - Daemon release to install
    ///
    /// # Returns
    /// - `Ok(Some(script))` - Code is valid and its node exists
    /// - `Ok(None)` - Unknown or expired code, or missing node
    /// - `Err(AppError)` - Database error
    pub async fn deploy_script(
        &self,
        code: &str,
        app_url: &str,
        pufferd_version: &str,
    ) -> Result<Option<String>, AppError> {
        let Some(deploy) = AutodeployRepository::new(self.db)
            .find_valid(code, now_unix())
            .await?
        else {
            return Ok(None);
        };

        let Some(node) = NodeRepository::new(self.db).find_by_id(deploy.node).await? else {
            return Ok(None);
        };

        Ok(Some(render_deploy_script(&node, app_url, pufferd_version)))
    }
}

fn render_deploy_script(node: &entity::node::Model, app_url: &str, pufferd_version: &str) -> String {
    let app_url = app_url.trim_end_matches('/');

    format!(
        r#"#!/bin/bash
# Installs pufferd for node "{name}" (id {id}).
set -e

PUFFERD_VERSION="{version}"
PANEL_URL="{app_url}"
NODE_ID="{id}"
NODE_IP="{ip}"
DAEMON_PORT="{port}"

if [ "$(id -u)" != "0" ]; then
    echo "This script must be run as root" 1>&2
    exit 1
fi

mkdir -p /srv/pufferd
cd /srv/pufferd

curl -fsSL -o pufferd "https://dl.pufferpanel.com/pufferd/${{PUFFERD_VERSION}}/pufferd"
chmod +x pufferd

./pufferd --install --auth "${{PANEL_URL}}" --node "${{NODE_ID}}" --ip "${{NODE_IP}}" --port "${{DAEMON_PORT}}"
"#,
        name = node.name,
        id = node.id,
        version = pufferd_version,
        app_url = app_url,
        ip = node.ip,
        port = node.daemon_listen,
    )
}
