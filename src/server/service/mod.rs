//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing validation rules and flow decisions
//! - **Orchestration**: Coordinating repository calls with daemon, captcha and email calls
//! - **Transaction Management**: Keeping server rows and daemon state in step

pub mod auth;
pub mod captcha;
pub mod daemon;
pub mod email;
pub mod oauth;
pub mod server;

#[cfg(test)]
mod test;
