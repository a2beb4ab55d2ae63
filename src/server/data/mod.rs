//! Database repository layer.
//!
//! Each repository wraps one table (or a closely related group of tables) and is
//! generic over `ConnectionTrait`, so the same methods run against the pooled
//! connection or inside an open transaction.

pub mod account_change;
pub mod autodeploy;
pub mod location;
pub mod node;
pub mod oauth;
pub mod server;
pub mod user;

#[cfg(test)]
mod test;
