use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    error::AppError,
    service::{daemon::DaemonClient, email::EmailService},
    state::{AppState, PanelSettings},
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the panel database.
///
/// Sessions hold flash messages and XSRF tokens only; login state lives in the
/// `pp_auth_token` cookie. The session table is created on first start.
///
/// # Arguments
/// - `db` - Connected database whose SQLite pool also stores the sessions
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Layer to apply to the router
/// - `Err(AppError::SqlxErr)` - Failed to create the session table
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store.migrate().await?;

    let session = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::hours(1)));

    Ok(session)
}

/// Builds the shared HTTP client used for daemon and captcha calls.
///
/// Redirects are disabled. `DAEMON_TIMEOUT_SECS` sets an overall request timeout;
/// without it the transport defaults apply.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(AppError::ReqwestErr)` - TLS backend failed to initialise
pub fn setup_reqwest_client(config: &Config) -> Result<reqwest::Client, AppError> {
    let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());

    if let Some(timeout) = config.daemon_timeout {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}

/// Assembles the application state from configuration and connected resources.
pub fn build_state(
    config: &Config,
    db: DatabaseConnection,
    http_client: reqwest::Client,
) -> AppState {
    let daemon = DaemonClient::new(http_client.clone(), config.daemon_use_tls);
    let email = EmailService::new(config.company_name.clone(), config.app_url.clone());

    AppState::new(
        db,
        http_client,
        daemon,
        email,
        PanelSettings {
            company_name: config.company_name.clone(),
            app_url: config.app_url.clone(),
            captcha_secret: config.captcha_secret.clone(),
            pufferd_version: config.pufferd_version.clone(),
        },
    )
}
