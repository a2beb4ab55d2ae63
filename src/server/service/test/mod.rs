use crate::server::{
    error::{daemon::DaemonError, AppError},
    service::{daemon::DaemonClient, email::EmailService},
};
use test_utils::{builder::TestBuilder, factory, mock_daemon::MockDaemon};

mod auth;
mod server;

/// Daemon client speaking plain HTTP, as the mock daemon does.
fn daemon_client() -> DaemonClient {
    DaemonClient::new(reqwest::Client::new(), false)
}

/// Email dispatcher that keeps messages in memory.
fn capturing_email() -> (
    EmailService,
    std::sync::Arc<std::sync::Mutex<Vec<crate::server::service::email::OutgoingEmail>>>,
) {
    EmailService::capturing("PufferPanel", "https://panel.example.com")
}
