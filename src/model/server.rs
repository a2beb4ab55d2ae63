use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::model::flash::FlashDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServerDto {
    pub id: i32,
    pub hash: String,
    pub name: String,
    pub node: i32,
    pub owner_id: i32,
    pub active: bool,
    pub date_added: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NodeDto {
    pub id: i32,
    pub name: String,
    pub location: i32,
    pub ip: String,
    pub daemon_listen: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationDto {
    pub id: i32,
    pub code: String,
    pub name: String,
}

/// Public view of a user account; never carries credentials or session data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: Option<String>,
    pub email: String,
    pub root_admin: bool,
}

/// One row of the admin server list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServerListEntryDto {
    pub server: ServerDto,
    pub owner_email: String,
    pub node_name: String,
    /// Live status reported by the hosting daemon, absent when it could not be queried.
    #[schema(value_type = Option<Object>)]
    pub connection: Option<Value>,
}

/// View model for `GET /admin/server`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServerListDto {
    pub flash: Vec<FlashDto>,
    pub servers: Vec<ServerListEntryDto>,
}

/// View model for `GET /admin/server/view/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServerViewDto {
    pub flash: Vec<FlashDto>,
    pub node: NodeDto,
    pub server: ServerDto,
    pub user: UserDto,
}

/// View model for `GET /admin/server/new`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewServerViewDto {
    pub locations: Vec<LocationDto>,
    pub flash: Vec<FlashDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AccountDto {
    pub email: String,
    pub username: Option<String>,
    /// Hex digest of the lower-cased email, used for avatar lookups.
    pub hash: String,
}

/// Response body for `GET /admin/server/accounts/{query}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountSearchDto {
    pub accounts: Vec<AccountDto>,
}

/// Response body for `POST /admin/server/new/node-list`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NodeListDto {
    pub nodes: Vec<NodeDto>,
}

/// `POST /admin/server/new/node-list` form body.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeListForm {
    pub location: i32,
}

/// `GET /admin/server/new/plugins` query string.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginsQuery {
    pub node: Option<String>,
}
