//! Per-test database and session state.

use std::sync::Arc;

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

/// Inactivity window of panel sessions.
pub const SESSION_EXPIRY: Duration = Duration::hours(1);

/// In-memory panel database plus an optional session stored in it.
///
/// The panel keeps flash messages and XSRF tokens in a `tower_sessions` table inside
/// its own SQLite database, so the session store here shares the pool of `db`.
#[derive(Default)]
pub struct TestContext {
    pub db: Option<DatabaseConnection>,
    pub session: Option<Session>,
    store: Option<SqliteStore>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects to a fresh `sqlite::memory:` database on first use.
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        if self.db.is_none() {
            self.db = Some(Database::connect("sqlite::memory:").await?);
        }

        self.db.as_ref().ok_or(TestError::NotInitialized)
    }

    /// Executes the panel's `CREATE TABLE` statements in order.
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Session store on the panel database, with its table created.
    ///
    /// The store is migrated once per context; later calls return a handle to the
    /// same table.
    pub async fn session_store(&mut self) -> Result<SqliteStore, TestError> {
        if let Some(store) = &self.store {
            return Ok(store.clone());
        }

        let pool = self.database().await?.get_sqlite_connection_pool().clone();
        let store = SqliteStore::new(pool);
        store.migrate().await?;

        self.store = Some(store.clone());

        Ok(store)
    }

    /// A fresh session with the panel's expiry, as a handler would receive it.
    ///
    /// # Example
    /// ```rust,ignore
    /// let mut test = TestBuilder::new().build().await?;
    /// let session = test.session().await?;
    ///
    /// FlashSession::new(session).push(FlashMessage::ServerDeleted).await?;
    /// ```
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        if self.session.is_none() {
            let store = self.session_store().await?;
            self.session = Some(Session::new(
                None,
                Arc::new(store),
                Some(Expiry::OnInactivity(SESSION_EXPIRY)),
            ));
        }

        self.session.as_ref().ok_or(TestError::NotInitialized)
    }

    /// Both handles at once, for tests that read the database after using the session.
    pub async fn db_and_session(&mut self) -> Result<(&DatabaseConnection, &Session), TestError> {
        self.session().await?;

        match (&self.db, &self.session) {
            (Some(db), Some(session)) => Ok((db, session)),
            _ => Err(TestError::NotInitialized),
        }
    }
}
