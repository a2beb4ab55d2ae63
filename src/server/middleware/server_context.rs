//! Loads the server behind `/admin/server/view/{id}` routes.

use std::collections::HashMap;

use axum::{
    extract::{Path, Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tower_sessions::Session;

use crate::server::{
    error::AppError,
    middleware::session::FlashSession,
    model::flash::FlashMessage,
    service::{oauth::OAuthService, server::ServerService},
    state::AppState,
    util::cookie,
};

const MISSING_SERVER_BODY: &str = "A server by that ID does not exist in the system.";

/// Route layer that resolves the `{id}` path segment into a `ServerContext` extension.
///
/// An unknown server sends GET requests back to the server list with a flash message
/// and answers other methods with a plain-text 404. When the owner holds an internal
/// OAuth token for the server it is handed to the browser as the `accessToken` cookie.
pub async fn load_server_context(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    method: Method,
    session: Session,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let server_id = params.get("id").and_then(|id| id.parse::<i32>().ok());

    let context = match server_id {
        Some(id) => {
            ServerService::new(&state.db, &state.daemon)
                .load_context(id)
                .await?
        }
        None => None,
    };

    let Some(context) = context else {
        if method == Method::GET {
            FlashSession::new(&session)
                .push(FlashMessage::ServerNotFound)
                .await?;
            return Ok(Redirect::to("/admin/server").into_response());
        }

        return Ok((StatusCode::NOT_FOUND, MISSING_SERVER_BODY).into_response());
    };

    let access_token = OAuthService::new(&state.db)
        .access_token_for(context.owner.id, context.server.id)
        .await?;

    let jar = match access_token {
        Some(token) => jar.add(cookie::access_token(token.secret().clone())),
        None => jar,
    };

    request.extensions_mut().insert(context);

    Ok((jar, next.run(request).await).into_response())
}
