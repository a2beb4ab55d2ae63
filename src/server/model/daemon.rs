use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Address of one daemon, `host:port`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DaemonEndpoint {
    pub host: String,
    pub port: i32,
}

impl DaemonEndpoint {
    pub fn new(host: impl Into<String>, port: i32) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn from_node(node: &entity::node::Model) -> Self {
        Self::new(node.ip.clone(), node.daemon_listen)
    }
}

impl fmt::Display for DaemonEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Envelope every daemon endpoint answers with.
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub code: Option<Value>,
}

/// Body of `PUT /server/{hash}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDaemonServer {
    /// The server hash; the daemon names its server object after it.
    pub name: String,
    #[serde(rename = "type")]
    pub plugin: String,
    pub data: Map<String, Value>,
    pub environment: Map<String, Value>,
}
