use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::CookieJar;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        auth::{
            LoginForm, LoginViewDto, PasswordResetForm, PasswordViewDto, RegisterForm,
            RegisterViewDto, TotpCheckForm,
        },
    },
    server::{
        controller::{flash_redirect, take_flash},
        error::AppError,
        middleware::{auth::AuthGuard, client_ip::ClientIp, session::XsrfSession},
        model::{
            auth::{
                CaptchaOutcome, LoginOutcome, LoginParams, PasswordResetOutcome,
                PasswordVerifyOutcome, RegisterOutcome, RegisterParams,
            },
            flash::FlashMessage,
        },
        service::{auth::AuthService, captcha::CaptchaService},
        state::AppState,
        util::cookie,
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Login form data: a fresh XSRF token and pending flash messages.
#[utoipa::path(
    get,
    path = "/auth/login",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Login form data", body = LoginViewDto),
        (status = 500, description = "Session error", body = ErrorDto)
    ),
)]
pub async fn login_view(session: Session) -> Result<impl IntoResponse, AppError> {
    let view = LoginViewDto {
        xsrf: XsrfSession::new(&session).issue().await?,
        flash: take_flash(&session).await?,
    };

    Ok((StatusCode::OK, Json(view)))
}

/// Log in with email and password, plus a TOTP code when the account requires one.
///
/// Checks run in order: XSRF token, captcha, password, TOTP. A successful login sets
/// the `pp_auth_token` cookie, persistent for seven days when `remember_me` is ticked.
///
/// # Returns
/// - `303 See Other` to `/index` - Logged in
/// - `303 See Other` to `/auth/login` - Any check failed; a flash message says which
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = AUTH_TAG,
    request_body(content = Object, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to /index on success, /auth/login otherwise"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    ip: ClientIp,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if !XsrfSession::new(&session).verify(&form.xsrf).await? {
        return Ok(flash_redirect(&session, FlashMessage::InvalidXsrf, "/auth/login")
            .await?
            .into_response());
    }

    if let Some(message) = check_captcha(&state, form.captcha_response.as_deref(), &ip).await {
        return Ok(flash_redirect(&session, message, "/auth/login")
            .await?
            .into_response());
    }

    let outcome = AuthService::new(&state.db, &state.email)
        .login(LoginParams {
            email: form.email,
            password: form.password,
            totp_token: form.totp_token,
            ip: ip.0,
        })
        .await?;

    let message = match outcome {
        LoginOutcome::Authenticated { session_token } => {
            let jar = jar.add(cookie::auth_token(
                session_token,
                form.remember_me.is_some(),
            ));
            return Ok((jar, Redirect::to("/index")).into_response());
        }
        LoginOutcome::InvalidCredentials => FlashMessage::InvalidCredentials,
        LoginOutcome::InvalidTotp => FlashMessage::InvalidTotp,
    };

    Ok(flash_redirect(&session, message, "/auth/login")
        .await?
        .into_response())
}

/// Whether the account behind an email requires a TOTP code, as `true` or `false`.
#[utoipa::path(
    post,
    path = "/auth/login/totp",
    tag = AUTH_TAG,
    request_body(content = Object, content_type = "application/x-www-form-urlencoded", description = "`check` = email"),
    responses(
        (status = 200, description = "`true` or `false`", body = String, content_type = "text/plain")
    ),
)]
pub async fn totp_check(
    State(state): State<AppState>,
    Form(form): Form<TotpCheckForm>,
) -> Result<impl IntoResponse, AppError> {
    let enabled = match form.check.as_deref() {
        Some(email) if !email.is_empty() => {
            AuthService::new(&state.db, &state.email)
                .totp_enabled(email)
                .await?
        }
        _ => false,
    };

    Ok(if enabled { "true" } else { "false" })
}

/// Log out.
///
/// When a session is active its cookies are expired and the user's session fields are
/// cleared.
#[utoipa::path(
    get,
    path = "/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 303, description = "Redirect to /auth/login")
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    ip: ClientIp,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &jar, &ip).current_user().await?;

    let Some(user) = user else {
        return Ok((jar, Redirect::to("/auth/login")));
    };

    let jar = jar
        .remove(cookie::removal(cookie::AUTH_TOKEN))
        .remove(cookie::removal(cookie::SERVER_NODE))
        .remove(cookie::removal(cookie::SERVER_HASH))
        .remove(cookie::removal(cookie::ACCESS_TOKEN));

    AuthService::new(&state.db, &state.email)
        .logout(user.id)
        .await?;

    Ok((jar, Redirect::to("/auth/login")))
}

/// Password recovery form data.
#[utoipa::path(
    get,
    path = "/auth/password",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Recovery form data", body = PasswordViewDto)
    ),
)]
pub async fn password_view(session: Session) -> Result<impl IntoResponse, AppError> {
    let view = PasswordViewDto {
        xsrf: Some(XsrfSession::new(&session).issue().await?),
        flash: take_flash(&session).await?,
        noshow: false,
    };

    Ok((StatusCode::OK, Json(view)))
}

/// Password recovery status page; the form is hidden.
#[utoipa::path(
    get,
    path = "/auth/password/{action}",
    tag = AUTH_TAG,
    params(
        ("action" = String, Path, description = "Status page name, e.g. `pending`")
    ),
    responses(
        (status = 200, description = "Status page data", body = PasswordViewDto)
    ),
)]
pub async fn password_status(
    session: Session,
    Path(_action): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let view = PasswordViewDto {
        xsrf: None,
        flash: take_flash(&session).await?,
        noshow: true,
    };

    Ok((StatusCode::OK, Json(view)))
}

/// Request a password reset email.
///
/// # Returns
/// - `303 See Other` to `/auth/password/pending` - Key emailed
/// - `303 See Other` to `/auth/password` - XSRF, captcha or unknown email
#[utoipa::path(
    post,
    path = "/auth/password",
    tag = AUTH_TAG,
    request_body(content = Object, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect with a flash message describing the outcome")
    ),
)]
pub async fn request_password_reset(
    State(state): State<AppState>,
    session: Session,
    ip: ClientIp,
    Form(form): Form<PasswordResetForm>,
) -> Result<impl IntoResponse, AppError> {
    if !XsrfSession::new(&session).verify(&form.xsrf).await? {
        return flash_redirect(&session, FlashMessage::InvalidXsrf, "/auth/password").await;
    }

    if let Some(message) = check_captcha(&state, form.captcha_response.as_deref(), &ip).await {
        return flash_redirect(&session, message, "/auth/password").await;
    }

    let outcome = AuthService::new(&state.db, &state.email)
        .request_password_reset(&form.email, &ip.0)
        .await?;

    match outcome {
        PasswordResetOutcome::Requested => {
            flash_redirect(
                &session,
                FlashMessage::PasswordResetSent,
                "/auth/password/pending",
            )
            .await
        }
        PasswordResetOutcome::UnknownEmail => {
            flash_redirect(
                &session,
                FlashMessage::PasswordResetEmailUnknown,
                "/auth/password",
            )
            .await
        }
    }
}

/// Redeem a password reset key; the new password is emailed.
#[utoipa::path(
    get,
    path = "/auth/password/verify/{key}",
    tag = AUTH_TAG,
    params(
        ("key" = String, Path, description = "Reset key from the email")
    ),
    responses(
        (status = 303, description = "Redirect to /auth/login on success, /auth/password otherwise")
    ),
)]
pub async fn verify_password_reset(
    State(state): State<AppState>,
    session: Session,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = AuthService::new(&state.db, &state.email)
        .verify_password_reset(&key)
        .await?;

    match outcome {
        PasswordVerifyOutcome::PasswordReset => {
            flash_redirect(&session, FlashMessage::NewPasswordSent, "/auth/login").await
        }
        PasswordVerifyOutcome::Unverifiable => {
            flash_redirect(
                &session,
                FlashMessage::PasswordResetUnverifiable,
                "/auth/password",
            )
            .await
        }
    }
}

/// Registration form data without a token.
#[utoipa::path(
    get,
    path = "/auth/register",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Registration form data", body = RegisterViewDto)
    ),
)]
pub async fn register_view(session: Session) -> Result<impl IntoResponse, AppError> {
    register_view_for(&session, None).await
}

/// Registration form data for an invitation token.
#[utoipa::path(
    get,
    path = "/auth/register/{token}",
    tag = AUTH_TAG,
    params(
        ("token" = String, Path, description = "Invitation token")
    ),
    responses(
        (status = 200, description = "Registration form data", body = RegisterViewDto)
    ),
)]
pub async fn register_view_with_token(
    session: Session,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    register_view_for(&session, Some(token)).await
}

async fn register_view_for(
    session: &Session,
    token: Option<String>,
) -> Result<(StatusCode, Json<RegisterViewDto>), AppError> {
    let view = RegisterViewDto {
        xsrf: XsrfSession::new(session).issue().await?,
        token,
        flash: take_flash(session).await?,
    };

    Ok((StatusCode::OK, Json(view)))
}

/// Complete an invited account.
///
/// Checks run in order: token present, XSRF token, pending unexpired token, username
/// rule, password rule, username and email not used by another account.
///
/// # Returns
/// - `303 See Other` to `/auth/login` - Account completed
/// - `303 See Other` to `/auth/register[/{token}]` - A check failed
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = AUTH_TAG,
    request_body(content = Object, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect with a flash message describing the outcome")
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<impl IntoResponse, AppError> {
    let Some(token) = form.token.filter(|token| !token.is_empty()) else {
        return flash_redirect(
            &session,
            FlashMessage::RegistrationTokenMissing,
            "/auth/register",
        )
        .await;
    };

    let retry = format!(
        "/auth/register/{}",
        url::form_urlencoded::byte_serialize(token.as_bytes()).collect::<String>()
    );

    if !XsrfSession::new(&session).verify(&form.xsrf).await? {
        return flash_redirect(&session, FlashMessage::InvalidXsrf, &retry).await;
    }

    let outcome = AuthService::new(&state.db, &state.email)
        .register(RegisterParams {
            token,
            username: form.username,
            email: form.email,
            password: form.password,
        })
        .await?;

    match outcome {
        RegisterOutcome::Registered => {
            flash_redirect(&session, FlashMessage::AccountCreated, "/auth/login").await
        }
        rejected => flash_redirect(&session, rejected.flash(), &retry).await,
    }
}

/// Daemon install script for the node behind an auto-deploy code.
#[utoipa::path(
    get,
    path = "/auth/remote/deploy/{key}",
    tag = AUTH_TAG,
    params(
        ("key" = String, Path, description = "Auto-deploy code")
    ),
    responses(
        (status = 200, description = "Shell script", body = String, content_type = "text/plain"),
        (status = 404, description = "Unknown or expired code", body = ErrorDto)
    ),
)]
pub async fn deploy_script(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let script = AuthService::new(&state.db, &state.email)
        .deploy_script(&key, &state.app_url, &state.pufferd_version)
        .await?;

    let Some(script) = script else {
        return Err(AppError::NotFound(
            "Unknown or expired deploy code".to_string(),
        ));
    };

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        script,
    ))
}

/// Runs the captcha check, returning the flash message for a failed check.
async fn check_captcha(
    state: &AppState,
    response: Option<&str>,
    ip: &ClientIp,
) -> Option<FlashMessage> {
    let outcome = CaptchaService::new(&state.http_client, state.captcha_secret.as_deref())
        .verify(response, &ip.0)
        .await;

    match outcome {
        CaptchaOutcome::Passed => None,
        CaptchaOutcome::Failed => Some(FlashMessage::CaptchaFailed),
        CaptchaOutcome::Unavailable => Some(FlashMessage::CaptchaUnavailable),
    }
}
