//! Router-level tests: requests go through the full route table with the panel's
//! session layer and a `ConnectInfo` peer address.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Method, Request, Response},
    Router,
};
use axum_extra::extract::cookie::Cookie;
use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, factory, mock_daemon::MockDaemon};
use tower::ServiceExt;

use crate::server::{
    error::AppError,
    router,
    service::{daemon::DaemonClient, email::EmailService},
    startup,
    state::{AppState, PanelSettings},
    util::cookie,
};


pub(crate) const ADMIN_TOKEN: &str = "admintoken12";
pub(crate) const CLIENT_IP: [u8; 4] = [10, 0, 0, 1];

/// The full panel router over `db`, without captcha.
pub(crate) async fn app(db: &DatabaseConnection) -> Router {
    let http = reqwest::Client::new();
    let state = AppState::new(
        db.clone(),
        http.clone(),
        DaemonClient::new(http, false),
        EmailService::new("PufferPanel", "https://panel.example.com"),
        PanelSettings {
            company_name: "PufferPanel".to_string(),
            app_url: "https://panel.example.com".to_string(),
            captcha_secret: None,
            pufferd_version: "v1.2.0".to_string(),
        },
    );

    let session = startup::connect_to_session(db).await.unwrap();

    router::router(state).unwrap().layer(session)
}

/// Sends one request through a fresh router.
pub(crate) async fn send(db: &DatabaseConnection, request: Request<Body>) -> Response<Body> {
    app(db).await.oneshot(request).await.unwrap()
}

/// A request from `CLIENT_IP` carrying the given `Cookie` header and form body.
pub(crate) fn request(
    method: Method,
    uri: &str,
    cookies: &[(&str, &str)],
    form: Option<&[(&str, &str)]>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if !cookies.is_empty() {
        let header = cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ");
        builder = builder.header(header::COOKIE, header);
    }

    let body = match form {
        Some(pairs) => {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs)
                .finish();
            Body::from(encoded)
        }
        None => Body::empty(),
    };

    let mut request = builder.body(body).unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from((CLIENT_IP, 40000))));

    request
}

/// A bodiless request authenticated as the admin created by `create_admin`.
pub(crate) fn admin_request(method: Method, uri: &str) -> Request<Body> {
    request(method, uri, &[(cookie::AUTH_TOKEN, ADMIN_TOKEN)], None)
}

pub(crate) async fn create_admin(
    db: &DatabaseConnection,
) -> Result<entity::user::Model, sea_orm::DbErr> {
    factory::user::UserFactory::new(db)
        .root_admin(true)
        .session(ADMIN_TOKEN, "10.0.0.1")
        .build()
        .await
}

/// Every `Set-Cookie` header of the response, parsed.
pub(crate) fn set_cookies(response: &Response<Body>) -> Vec<Cookie<'static>> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse(value.to_string()).ok())
        .collect()
}

pub(crate) fn find_cookie(response: &Response<Body>, name: &str) -> Option<Cookie<'static>> {
    set_cookies(response)
        .into_iter()
        .find(|cookie| cookie.name() == name)
}

pub(crate) fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
