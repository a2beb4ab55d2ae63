//! Request guards and extractors shared by the controllers.

pub mod auth;
pub mod client_ip;
pub mod server_context;
pub mod session;

#[cfg(test)]
mod test;
