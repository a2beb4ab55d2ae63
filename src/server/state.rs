//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - HTTP client for captcha verification
//! - Daemon client for node REST calls
//! - Email dispatcher for account notifications
//! - Panel settings (company name, public URL, captcha secret, pufferd version)

use sea_orm::DatabaseConnection;

use crate::server::service::{daemon::DaemonClient, email::EmailService};

/// Application state containing shared resources and dependencies.
///
/// All fields use cheap-to-clone types:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `reqwest::Client` and `DaemonClient` use an `Arc` internally
/// - `EmailService` holds only settings
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for outbound requests other than daemon calls.
    ///
    /// Configured with no redirects to prevent SSRF.
    pub http_client: reqwest::Client,

    /// Client for the daemons running on each node.
    pub daemon: DaemonClient,

    /// Dispatcher for templated account emails.
    pub email: EmailService,

    /// Name shown in email subjects.
    pub company_name: String,

    /// Application base URL for generating links.
    pub app_url: String,

    /// reCAPTCHA secret; `None` disables captcha checks.
    pub captcha_secret: Option<String>,

    /// Daemon release referenced by the auto-deploy script.
    pub pufferd_version: String,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `http_client` - HTTP client for external API requests
    /// - `daemon` - Client for node daemons
    /// - `email` - Email dispatcher
    /// - `settings` - Panel settings taken from configuration
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        daemon: DaemonClient,
        email: EmailService,
        settings: PanelSettings,
    ) -> Self {
        Self {
            db,
            http_client,
            daemon,
            email,
            company_name: settings.company_name,
            app_url: settings.app_url,
            captcha_secret: settings.captcha_secret,
            pufferd_version: settings.pufferd_version,
        }
    }
}

/// Plain settings copied out of `Config` into the state.
#[derive(Debug, Clone)]
pub struct PanelSettings {
    pub company_name: String,
    pub app_url: String,
    pub captcha_secret: Option<String>,
    pub pufferd_version: String,
}
