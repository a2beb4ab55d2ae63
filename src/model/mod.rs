//! Data transfer objects shared with the presentation layer.
//!
//! Every handler that would render a page returns one of these view models as JSON.

pub mod api;
pub mod auth;
pub mod flash;
pub mod server;
