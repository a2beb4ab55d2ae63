//! Type-safe session management wrappers.
//!
//! This module provides type-safe interfaces for the data the panel keeps in the
//! server-side session, organized by concern. Each struct handles a specific domain of
//! session data, preventing key typos and centralizing session-related logic.
//!
//! # Architecture
//!
//! - `FlashSession` - Flash messages queued for the next rendered view
//! - `XsrfSession` - XSRF token issued with each form and checked on submission
//!
//! Login state itself lives in the `pp_auth_token` cookie and the `users` table, not
//! in this session.

use oauth2::CsrfToken;
use tower_sessions::Session;

use crate::server::{error::AppError, model::flash::FlashMessage};

// Session key constants
const SESSION_FLASH_MESSAGES: &str = "flash:messages";
const SESSION_XSRF_TOKEN: &str = "auth:xsrf_token";

/// Flash message queue.
///
/// Messages are appended by the handler that redirects and drained by the handler
/// that renders the next view.
pub struct FlashSession<'a> {
    /// The underlying tower-sessions Session instance.
    session: &'a Session,
}

impl<'a> FlashSession<'a> {
    /// Creates a new FlashSession wrapper.
    ///
    /// # Arguments
    /// - `session` - Reference to the tower-sessions Session to wrap
    ///
    /// # Returns
    /// A new FlashSession instance
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Appends a message to the queue.
    ///
    /// # Arguments
    /// - `message` - Flash message to show on the next rendered view
    ///
    /// # Returns
    /// - `Ok(())` - Message stored
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn push(&self, message: FlashMessage) -> Result<(), AppError> {
        let mut messages: Vec<FlashMessage> = self
            .session
            .get(SESSION_FLASH_MESSAGES)
            .await?
            .unwrap_or_default();

        messages.push(message);

        self.session
            .insert(SESSION_FLASH_MESSAGES, messages)
            .await?;
        Ok(())
    }

    /// Removes and returns every queued message in insertion order.
    ///
    /// # Returns
    /// - `Ok(Vec<FlashMessage>)` - Queued messages, empty when there are none
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn take(&self) -> Result<Vec<FlashMessage>, AppError> {
        let messages = self
            .session
            .remove(SESSION_FLASH_MESSAGES)
            .await?
            .unwrap_or_default();
        Ok(messages)
    }
}

/// XSRF protection for the auth forms.
///
/// A token is issued whenever a form is rendered and must be echoed back in the
/// form's `xsrf` field. Each token can be checked once.
pub struct XsrfSession<'a> {
    /// The underlying tower-sessions Session instance.
    session: &'a Session,
}

impl<'a> XsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Generates a random token, stores it and returns it for the form.
    ///
    /// Replaces any token issued earlier in the same session.
    ///
    /// # Returns
    /// - `Ok(String)` - Token to embed in the rendered form
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn issue(&self) -> Result<String, AppError> {
        let token = CsrfToken::new_random().secret().clone();

        self.session
            .insert(SESSION_XSRF_TOKEN, token.clone())
            .await?;
        Ok(token)
    }

    /// Checks a submitted token against the stored one and removes it.
    ///
    /// # Arguments
    /// - `submitted` - The form's `xsrf` field
    ///
    /// # Returns
    /// - `Ok(true)` - Tokens match
    /// - `Ok(false)` - No token stored, empty submission or mismatch
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn verify(&self, submitted: &str) -> Result<bool, AppError> {
        let stored: Option<String> = self.session.remove(SESSION_XSRF_TOKEN).await?;

        Ok(matches!(stored, Some(token) if !submitted.is_empty() && token == submitted))
    }
}
