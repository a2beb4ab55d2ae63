use std::collections::{BTreeMap, HashMap};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Form, Json,
};
// Aliased so utoipa's axum path-param inference skips the map extractor;
// the params are documented explicitly in the `utoipa::path` attribute.
use axum::extract::Path as RawPath;
use axum_extra::extract::CookieJar;
use base64::{engine::general_purpose::STANDARD, Engine};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        server::{
            AccountDto, AccountSearchDto, LocationDto, NewServerViewDto, NodeDto, NodeListDto,
            NodeListForm, PluginsQuery, ServerListDto, ServerViewDto,
        },
    },
    server::{
        controller::{flash_redirect, take_flash},
        error::{internal::InternalError, AppError},
        middleware::auth::AuthenticatedUser,
        model::{
            flash::FlashMessage,
            server::{CreateServerOutcome, CreateServerParams, DeleteServerOutcome, ServerContext},
        },
        service::server::ServerService,
        state::AppState,
        util::cookie,
    },
};

/// Tag for grouping server administration endpoints in OpenAPI documentation
pub static SERVER_TAG: &str = "server";

/// List all servers with their live status.
///
/// Servers are joined with their owner and node and ordered active first. Each
/// distinct daemon is asked once for the status of the servers it hosts; daemons
/// that cannot be reached are skipped and their servers carry no `connection`.
///
/// # Access Control
/// - `RootAdmin` - Enforced by the admin route layer
///
/// # Returns
/// - `200 OK` - Server list and pending flash messages
/// - `401 Unauthorized` / `403 Forbidden` - Not logged in or not a root admin
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/admin/server",
    tag = SERVER_TAG,
    responses(
        (status = 200, description = "Server list", body = ServerListDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a root admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_servers(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let servers = ServerService::new(&state.db, &state.daemon).list().await?;

    let view = ServerListDto {
        flash: take_flash(&session).await?,
        servers: servers.into_iter().map(|entry| entry.into_dto()).collect(),
    };

    Ok((StatusCode::OK, Json(view)))
}

/// Show one server with its node and owner.
///
/// The server is loaded by the server context layer; an unknown ID never reaches this
/// handler.
#[utoipa::path(
    get,
    path = "/admin/server/view/{id}",
    tag = SERVER_TAG,
    params(
        ("id" = i32, Path, description = "Server ID")
    ),
    responses(
        (status = 200, description = "Server details", body = ServerViewDto),
        (status = 303, description = "Unknown server, redirected to the server list"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Owner or node of the server is missing", body = ErrorDto)
    ),
)]
pub async fn view_server(
    session: Session,
    Extension(context): Extension<ServerContext>,
) -> Result<impl IntoResponse, AppError> {
    let view = ServerViewDto {
        flash: take_flash(&session).await?,
        node: NodeDto::from(&context.node),
        server: (&context.server).into(),
        user: (&context.owner).into(),
    };

    Ok((StatusCode::OK, Json(view)))
}

/// Delete a server from the panel and its daemon.
///
/// Local rows are removed in one transaction that is committed only when the daemon
/// confirms the deletion. With the `force` path flag a failing daemon is ignored and
/// the local rows are removed anyway.
///
/// # Returns
/// - `303 See Other` to `/admin/server` - Deleted (or force deleted)
/// - `303 See Other` to `/admin/server/view/{id}?tab=delete` - Daemon failed, nothing changed
#[utoipa::path(
    post,
    path = "/admin/server/view/{id}/delete/{force}",
    tag = SERVER_TAG,
    params(
        ("id" = i32, Path, description = "Server ID"),
        ("force" = String, Path, description = "Literal `force` to ignore daemon failures; the segment may be omitted")
    ),
    responses(
        (status = 303, description = "Redirect with a flash message describing the outcome"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Unknown server")
    ),
)]
pub async fn delete_server(
    State(state): State<AppState>,
    session: Session,
    RawPath(params): RawPath<HashMap<String, String>>,
    Extension(AuthenticatedUser(admin)): Extension<AuthenticatedUser>,
    Extension(context): Extension<ServerContext>,
) -> Result<impl IntoResponse, AppError> {
    let force = params.get("force").is_some_and(|flag| flag == "force");

    let outcome = ServerService::new(&state.db, &state.daemon)
        .delete(&context, force)
        .await?;

    let redirect = match outcome {
        DeleteServerOutcome::Deleted => {
            tracing::info!("Admin {} deleted server {}", admin.id, context.server.id);
            flash_redirect(&session, FlashMessage::ServerDeleted, "/admin/server").await?
        }
        DeleteServerOutcome::ForceDeleted(_) => {
            tracing::info!(
                "Admin {} force deleted server {}",
                admin.id,
                context.server.id
            );
            flash_redirect(&session, FlashMessage::ServerForceDeleted, "/admin/server").await?
        }
        DeleteServerOutcome::Failed(_) => {
            let to = format!("/admin/server/view/{}?tab=delete", context.server.id);
            flash_redirect(&session, FlashMessage::ServerDeleteFailed, &to).await?
        }
    };

    Ok(redirect)
}

/// New server form data: the locations to choose from.
#[utoipa::path(
    get,
    path = "/admin/server/new",
    tag = SERVER_TAG,
    responses(
        (status = 200, description = "Form data", body = NewServerViewDto),
        (status = 401, description = "User not authenticated", body = ErrorDto)
    ),
)]
pub async fn new_server_view(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let locations = ServerService::new(&state.db, &state.daemon)
        .locations()
        .await?;

    let view = NewServerViewDto {
        locations: locations.iter().map(LocationDto::from).collect(),
        flash: take_flash(&session).await?,
    };

    Ok((StatusCode::OK, Json(view)))
}

/// Create a server and provision it on its node.
///
/// Every submission stores a base64 JSON copy of the form in the
/// `__temporary_pp_admin_newserver` cookie for 60 seconds. Validation failures and
/// daemon failures redirect back to the form with a flash message. On success the
/// daemon-side install is started in the background.
///
/// # Arguments
/// - `form` - `location`, `plugin`, `node`, `server_name`, `email`, plus any
///   daemon-specific fields, which are forwarded to the daemon as-is
///
/// # Returns
/// - `303 See Other` to `/admin/server/view/{id}` - Created
/// - `303 See Other` to `/admin/server/new` - Rejected or daemon failure
#[utoipa::path(
    post,
    path = "/admin/server/new",
    tag = SERVER_TAG,
    request_body(content = Object, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect with a flash message describing the outcome"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_server(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Extension(AuthenticatedUser(admin)): Extension<AuthenticatedUser>,
    Form(form): Form<BTreeMap<String, String>>,
) -> Result<Response, AppError> {
    let encoded = STANDARD.encode(serde_json::to_vec(&form).map_err(InternalError::from)?);
    let jar = jar.add(cookie::new_server_form(encoded));

    let service = ServerService::new(&state.db, &state.daemon);
    let outcome = service.create(CreateServerParams::from_form(&form)).await?;

    let redirect = match outcome {
        CreateServerOutcome::Created(created) => {
            tracing::info!(
                "Admin {} created server {} for owner {}",
                admin.id,
                created.server.id,
                created.server.owner_id
            );

            service.spawn_install(&created);

            let to = format!("/admin/server/view/{}", created.server.id);
            flash_redirect(&session, FlashMessage::ServerCreated, &to).await?
        }
        CreateServerOutcome::Rejected(rejection) => {
            flash_redirect(&session, rejection.flash(), "/admin/server/new").await?
        }
        CreateServerOutcome::DaemonFailed(e) => {
            let message = FlashMessage::DaemonRequestFailed {
                detail: e.to_string(),
            };
            flash_redirect(&session, message, "/admin/server/new").await?
        }
    };

    Ok((jar, redirect).into_response())
}

/// Search accounts by email or username for the owner field.
#[utoipa::path(
    get,
    path = "/admin/server/accounts/{email}",
    tag = SERVER_TAG,
    params(
        ("email" = String, Path, description = "Substring of the email or username")
    ),
    responses(
        (status = 200, description = "Matching accounts", body = AccountSearchDto),
        (status = 401, description = "User not authenticated", body = ErrorDto)
    ),
)]
pub async fn search_accounts(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let users = ServerService::new(&state.db, &state.daemon)
        .search_accounts(&query)
        .await?;

    let accounts = users.iter().map(AccountDto::from).collect();

    Ok((StatusCode::OK, Json(AccountSearchDto { accounts })))
}

/// Nodes of a location for the new server form.
#[utoipa::path(
    post,
    path = "/admin/server/new/node-list",
    tag = SERVER_TAG,
    request_body(content = Object, content_type = "application/x-www-form-urlencoded", description = "`location` ID"),
    responses(
        (status = 200, description = "Nodes of the location", body = NodeListDto),
        (status = 401, description = "User not authenticated", body = ErrorDto)
    ),
)]
pub async fn node_list(
    State(state): State<AppState>,
    Form(form): Form<NodeListForm>,
) -> Result<impl IntoResponse, AppError> {
    let nodes = ServerService::new(&state.db, &state.daemon)
        .nodes_for_location(form.location)
        .await?;

    let nodes = nodes.iter().map(NodeDto::from).collect();

    Ok((StatusCode::OK, Json(NodeListDto { nodes })))
}

/// Proxy the plugin templates of a node's daemon.
#[utoipa::path(
    get,
    path = "/admin/server/new/plugins",
    tag = SERVER_TAG,
    params(
        ("node" = i32, Query, description = "Node ID")
    ),
    responses(
        (status = 200, description = "The daemon's template list, untouched", body = Object),
        (status = 400, description = "Missing or non-numeric node ID", body = ErrorDto),
        (status = 404, description = "Unknown node", body = ErrorDto),
        (status = 503, description = "Daemon unreachable", body = ErrorDto)
    ),
)]
pub async fn plugins(
    State(state): State<AppState>,
    Query(query): Query<PluginsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let node_id = query
        .node
        .as_deref()
        .and_then(|node| node.trim().parse::<i32>().ok())
        .ok_or_else(|| AppError::BadRequest("A numeric node ID is required.".to_string()))?;

    let templates = ServerService::new(&state.db, &state.daemon)
        .templates(node_id)
        .await?;

    Ok((StatusCode::OK, Json(templates)))
}
