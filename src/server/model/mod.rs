//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! operation parameters and outcomes. Entity models are wrapped at the repository
//! boundary and transformed to DTOs at the controller boundary.

pub mod auth;
pub mod daemon;
pub mod flash;
pub mod oauth;
pub mod server;
pub mod user;
