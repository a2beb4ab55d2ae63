use std::collections::BTreeMap;

use oauth2::AccessToken;
use serde_json::{Map, Value};

use crate::{
    model::server::{LocationDto, NodeDto, ServerDto, ServerListEntryDto},
    server::{error::daemon::DaemonError, model::flash::FlashMessage},
};

/// Form fields consumed by the panel itself; everything else is forwarded to the daemon.
pub const PANEL_FORM_FIELDS: [&str; 5] = ["location", "plugin", "node", "server_name", "email"];

/// Server, owner and node loaded for every `/admin/server/view/{id}` request.
#[derive(Debug, Clone)]
pub struct ServerContext {
    pub server: entity::server::Model,
    pub node: entity::node::Model,
    pub owner: entity::user::Model,
}

/// Parameters for creating a new server, parsed from the admin form.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateServerParams {
    /// `None` when the submitted node id is not a number.
    pub node_id: Option<i32>,
    pub name: String,
    pub owner_email: String,
    pub plugin: String,
    /// Daemon-specific fields, i.e. the form minus `PANEL_FORM_FIELDS`.
    pub data: Map<String, Value>,
}

impl CreateServerParams {
    pub fn from_form(form: &BTreeMap<String, String>) -> Self {
        let field = |key: &str| form.get(key).cloned().unwrap_or_default();

        let data = form
            .iter()
            .filter(|(key, _)| !PANEL_FORM_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();

        Self {
            node_id: form.get("node").and_then(|node| node.trim().parse().ok()),
            name: field("server_name"),
            owner_email: field("email"),
            plugin: field("plugin"),
            data,
        }
    }
}

/// Row values for a new server; `hash` and `daemon_secret` are already unique.
#[derive(Debug, Clone)]
pub struct CreateServerRecord {
    pub hash: String,
    pub daemon_secret: String,
    pub node: i32,
    pub name: String,
    pub owner_id: i32,
    pub date_added: i64,
}

/// Validation failures of the create form. None of them writes anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateServerRejection {
    NodeNotFound,
    InvalidName,
    OwnerNotFound,
    NameTaken,
}

impl CreateServerRejection {
    pub fn flash(self) -> FlashMessage {
        match self {
            Self::NodeNotFound => FlashMessage::NodeNotFound,
            Self::InvalidName => FlashMessage::InvalidServerName,
            Self::OwnerNotFound => FlashMessage::OwnerEmailNotFound,
            Self::NameTaken => FlashMessage::ServerNameTaken,
        }
    }
}

/// A committed server plus what the background install call needs.
#[derive(Debug, Clone)]
pub struct CreatedServer {
    pub server: entity::server::Model,
    pub node: entity::node::Model,
    pub bearer: AccessToken,
}

#[derive(Debug)]
pub enum CreateServerOutcome {
    Created(CreatedServer),
    Rejected(CreateServerRejection),
    /// The daemon refused or could not be reached; the transaction was rolled back.
    DaemonFailed(DaemonError),
}

#[derive(Debug)]
pub enum DeleteServerOutcome {
    Deleted,
    /// The daemon call failed but the panel rows were removed anyway.
    ForceDeleted(DaemonError),
    /// The daemon call failed and the transaction was rolled back.
    Failed(DaemonError),
}

/// One server of the admin list with its owner, node and live status.
#[derive(Debug, Clone)]
pub struct ServerListEntry {
    pub server: entity::server::Model,
    pub owner: entity::user::Model,
    pub node: entity::node::Model,
    pub connection: Option<Value>,
}

impl ServerListEntry {
    pub fn into_dto(self) -> ServerListEntryDto {
        ServerListEntryDto {
            server: ServerDto::from(&self.server),
            owner_email: self.owner.email,
            node_name: self.node.name,
            connection: self.connection,
        }
    }
}

impl From<&entity::server::Model> for ServerDto {
    fn from(server: &entity::server::Model) -> Self {
        Self {
            id: server.id,
            hash: server.hash.clone(),
            name: server.name.clone(),
            node: server.node,
            owner_id: server.owner_id,
            active: server.active,
            date_added: server.date_added,
        }
    }
}

impl From<&entity::node::Model> for NodeDto {
    fn from(node: &entity::node::Model) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            location: node.location,
            ip: node.ip.clone(),
            daemon_listen: node.daemon_listen,
        }
    }
}

impl From<&entity::location::Model> for LocationDto {
    fn from(location: &entity::location::Model) -> Self {
        Self {
            id: location.id,
            code: location.code.clone(),
            name: location.name.clone(),
        }
    }
}
