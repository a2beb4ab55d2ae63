//! Internal OAuth clients and tokens.
//!
//! The panel issues one internal-use client per (user, server) pair so the browser can
//! talk to the daemon on the user's behalf, and keeps a panel-wide client whose tokens
//! authenticate the panel's own daemon calls.

use oauth2::AccessToken;
use sea_orm::{ConnectionTrait, DbErr};

use crate::server::{
    data::oauth::OAuthRepository,
    model::oauth::CreateOAuthClientParams,
    util::keygen::{keygen, now_unix},
};

/// Scopes every user with access to a server receives.
pub const USER_SCOPES: &[&str] = &[
    "server.start",
    "server.stop",
    "server.install",
    "server.console",
    "server.console.send",
    "server.stats",
    "server.network",
    "server.file.get",
    "server.file.put",
];

/// Additional scopes for root administrators.
pub const ADMIN_SCOPES: &[&str] = &[
    "server.create",
    "server.delete",
    "server.edit",
    "server.reload",
    "node.templates",
];

/// Client ID of the panel-wide client.
pub const PANEL_CLIENT_ID: &str = ".panel";

const INTERNAL_USE: &str = "internal_use";
const SECRET_LENGTH: usize = 64;
const TOKEN_LENGTH: usize = 64;
const PANEL_TOKEN_TTL_SECS: i64 = 3600;

pub struct OAuthService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OAuthService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Client ID of the internal client for a (user, server) pair.
    pub fn internal_client_id(user_id: i32, server_id: i32) -> String {
        format!(".internal_{user_id}_{server_id}")
    }

    /// Space separated scopes: user scopes, plus admin scopes for root admins.
    pub fn scopes_for(root_admin: bool) -> String {
        let mut scopes: Vec<&str> = USER_SCOPES.to_vec();

        if root_admin {
            scopes.extend_from_slice(ADMIN_SCOPES);
        }

        scopes.join(" ")
    }

    /// Creates an internal client and its non-expiring access token.
    ///
    /// # Arguments
    /// - `user_id` - User the client acts for
    /// - `server_id` - Server the client is scoped to
    /// - `scopes` - Space separated scopes granted to the token
    ///
    /// # Returns
    /// - `Ok((client, token))` - Inserted rows
    /// - `Err(DbErr)` - Insert failed
    pub async fn create_internal_client(
        &self,
        user_id: i32,
        server_id: i32,
        scopes: String,
    ) -> Result<
        (
            entity::oauth_client::Model,
            entity::oauth_access_token::Model,
        ),
        DbErr,
    > {
        let repo = OAuthRepository::new(self.db);

        let client = repo
            .create_client(CreateOAuthClientParams {
                client_id: Self::internal_client_id(user_id, server_id),
                client_secret: keygen(SECRET_LENGTH),
                user_id: Some(user_id),
                server_id: Some(server_id),
                scopes: scopes.clone(),
                name: INTERNAL_USE.to_string(),
                description: INTERNAL_USE.to_string(),
            })
            .await?;

        let token = repo
            .create_token(client.id, keygen(TOKEN_LENGTH), None, scopes)
            .await?;

        Ok((client, token))
    }

    /// Grants the owner and every other root admin access to a new server.
    ///
    /// The owner gets user scopes (plus admin scopes when they are a root admin); every
    /// other root admin gets user and admin scopes. Each user receives exactly one
    /// client/token pair.
    ///
    /// # Arguments
    /// - `owner` - Owner of the server
    /// - `server_id` - The new server
    /// - `root_admins` - All root administrators
    pub async fn grant_server_access(
        &self,
        owner: &entity::user::Model,
        server_id: i32,
        root_admins: &[entity::user::Model],
    ) -> Result<(), DbErr> {
        self.create_internal_client(owner.id, server_id, Self::scopes_for(owner.root_admin))
            .await?;

        for admin in root_admins.iter().filter(|admin| admin.id != owner.id) {
            self.create_internal_client(admin.id, server_id, Self::scopes_for(true))
                .await?;
        }

        Ok(())
    }

    /// Returns a live panel access token, issuing one when none is valid.
    ///
    /// The panel client is created on first use. Issued tokens expire after an hour.
    ///
    /// # Returns
    /// - `Ok(AccessToken)` - Token to send as the daemon bearer
    /// - `Err(DbErr)` - Database error while reading or creating rows
    pub async fn panel_access_token(&self) -> Result<AccessToken, DbErr> {
        let repo = OAuthRepository::new(self.db);
        let now = now_unix();

        let client = match repo.find_client(PANEL_CLIENT_ID).await? {
            Some(client) => client,
            None => {
                let scopes = Self::scopes_for(true);
                let created = repo
                    .create_client(CreateOAuthClientParams {
                        client_id: PANEL_CLIENT_ID.to_string(),
                        client_secret: keygen(SECRET_LENGTH),
                        user_id: None,
                        server_id: None,
                        scopes,
                        name: "panel".to_string(),
                        description: "Panel access to daemons".to_string(),
                    })
                    .await;

                match created {
                    Ok(client) => client,
                    // Another request created it first.
                    Err(err) => repo.find_client(PANEL_CLIENT_ID).await?.ok_or(err)?,
                }
            }
        };

        if let Some(token) = repo.find_live_token(client.id, now).await? {
            return Ok(AccessToken::new(token.access_token));
        }

        tracing::debug!("Issuing new panel access token");

        let token = repo
            .create_token(
                client.id,
                keygen(TOKEN_LENGTH),
                Some(now + PANEL_TOKEN_TTL_SECS),
                client.scopes,
            )
            .await?;

        Ok(AccessToken::new(token.access_token))
    }

    /// The internal token a user holds for a server, if any.
    pub async fn access_token_for(
        &self,
        user_id: i32,
        server_id: i32,
    ) -> Result<Option<AccessToken>, DbErr> {
        let repo = OAuthRepository::new(self.db);

        let Some(client) = repo
            .find_client(&Self::internal_client_id(user_id, server_id))
            .await?
        else {
            return Ok(None);
        };

        let token = repo.find_live_token(client.id, now_unix()).await?;

        Ok(token.map(|token| AccessToken::new(token.access_token)))
    }
}
