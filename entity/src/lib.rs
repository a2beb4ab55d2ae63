//! SeaORM entity models for the panel database.

pub mod prelude;

pub mod account_change;
pub mod autodeploy;
pub mod location;
pub mod node;
pub mod oauth_access_token;
pub mod oauth_client;
pub mod permission;
pub mod server;
pub mod subuser;
pub mod user;
