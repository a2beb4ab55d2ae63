//! HTTP handlers.
//!
//! Handlers return JSON view models for the presentation layer, or redirects after
//! queueing flash messages in the session.

pub mod auth;
pub mod server;

use axum::response::Redirect;
use tower_sessions::Session;

use crate::{
    model::flash::FlashDto,
    server::{error::AppError, middleware::session::FlashSession, model::flash::FlashMessage},
};

/// Drains the session's flash queue into DTOs for the next rendered view.
async fn take_flash(session: &Session) -> Result<Vec<FlashDto>, AppError> {
    let messages = FlashSession::new(session).take().await?;

    Ok(messages.into_iter().map(FlashMessage::into_dto).collect())
}

/// Queues a flash message and redirects to `to`.
async fn flash_redirect(
    session: &Session,
    message: FlashMessage,
    to: &str,
) -> Result<Redirect, AppError> {
    FlashSession::new(session).push(message).await?;

    Ok(Redirect::to(to))
}

#[cfg(test)]
pub(crate) mod test;
