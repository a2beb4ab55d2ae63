//! Route table and API documentation.
//!
//! - `/admin/*` requires a logged-in root admin (`require_root_admin`)
//! - `/admin/server/view/{id}/*` additionally loads the server (`load_server_context`)
//! - form POSTs under `/auth/*` are rate limited per client IP

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::{
    model::{
        api::ErrorDto,
        auth::{LoginViewDto, PasswordViewDto, RegisterViewDto},
        flash::{FlashDto, FlashLevel},
        server::{
            AccountDto, AccountSearchDto, LocationDto, NewServerViewDto, NodeDto, NodeListDto,
            ServerDto, ServerListDto, ServerListEntryDto, ServerViewDto, UserDto,
        },
    },
    server::{
        controller::{auth, server},
        error::config::ConfigError,
        middleware::{auth::require_root_admin, server_context::load_server_context},
        state::AppState,
    },
};

/// Requests replenished per second for each client on the rate limited routes.
const AUTH_RATE_PER_SECOND: u64 = 2;
/// Requests a client may burst before being limited.
const AUTH_RATE_BURST: u32 = 10;

#[derive(OpenApi)]
#[openapi(
    info(title = "PufferPanel", description = "Game server panel administration and authentication"),
    paths(
        server::list_servers,
        server::view_server,
        server::delete_server,
        server::new_server_view,
        server::create_server,
        server::search_accounts,
        server::node_list,
        server::plugins,
        auth::login_view,
        auth::login,
        auth::totp_check,
        auth::logout,
        auth::password_view,
        auth::password_status,
        auth::request_password_reset,
        auth::verify_password_reset,
        auth::register_view,
        auth::register_view_with_token,
        auth::register,
        auth::deploy_script,
    ),
    components(schemas(
        ErrorDto,
        FlashDto,
        FlashLevel,
        ServerDto,
        NodeDto,
        LocationDto,
        UserDto,
        ServerListEntryDto,
        ServerListDto,
        ServerViewDto,
        NewServerViewDto,
        AccountDto,
        AccountSearchDto,
        NodeListDto,
        LoginViewDto,
        PasswordViewDto,
        RegisterViewDto,
    )),
    tags(
        (name = "server", description = "Server administration"),
        (name = "auth", description = "Login, password recovery, registration and node deployment"),
    )
)]
pub struct ApiDoc;

/// Builds the application router.
///
/// # Arguments
/// - `state` - Shared state, also handed to the route layers
///
/// # Returns
/// - `Ok(Router)` - Router with state applied
/// - `Err(ConfigError::InvalidRateLimit)` - Rate limiter configuration rejected
pub fn router(state: AppState) -> Result<Router, ConfigError> {
    Ok(Router::new()
        .merge(admin_routes(&state))
        .merge(auth_routes()?)
        .route("/api/openapi.json", get(openapi))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn admin_routes(state: &AppState) -> Router<AppState> {
    let view = Router::new()
        .route("/admin/server/view/{id}", get(server::view_server))
        .route("/admin/server/view/{id}/delete", post(server::delete_server))
        .route(
            "/admin/server/view/{id}/delete/{force}",
            post(server::delete_server),
        )
        .route_layer(from_fn_with_state(state.clone(), load_server_context));

    Router::new()
        .route("/admin/server", get(server::list_servers))
        .route(
            "/admin/server/new",
            get(server::new_server_view).post(server::create_server),
        )
        .route("/admin/server/new/node-list", post(server::node_list))
        .route("/admin/server/new/plugins", get(server::plugins))
        .route("/admin/server/accounts/{email}", get(server::search_accounts))
        .merge(view)
        .route_layer(from_fn_with_state(state.clone(), require_root_admin))
}

fn auth_routes() -> Result<Router<AppState>, ConfigError> {
    let governor = GovernorConfigBuilder::default()
        .per_second(AUTH_RATE_PER_SECOND)
        .burst_size(AUTH_RATE_BURST)
        .finish()
        .ok_or(ConfigError::InvalidRateLimit)?;

    let limited = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/login/totp", post(auth::totp_check))
        .route("/auth/password", post(auth::request_password_reset))
        .route("/auth/register", post(auth::register))
        .route_layer(GovernorLayer::new(Arc::new(governor)));

    Ok(Router::new()
        .route("/auth/login", get(auth::login_view))
        .route("/auth/logout", get(auth::logout))
        .route("/auth/password", get(auth::password_view))
        .route("/auth/password/{action}", get(auth::password_status))
        .route("/auth/password/verify/{key}", get(auth::verify_password_reset))
        .route("/auth/register", get(auth::register_view))
        .route("/auth/register/{token}", get(auth::register_view_with_token))
        .route("/auth/remote/deploy/{key}", get(auth::deploy_script))
        .merge(limited))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
