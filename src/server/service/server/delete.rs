use sea_orm::TransactionTrait;

use crate::server::{
    data::server::ServerRepository,
    error::AppError,
    model::{
        daemon::DaemonEndpoint,
        server::{DeleteServerOutcome, ServerContext},
    },
    service::{oauth::OAuthService, server::ServerService},
};

impl<'a> ServerService<'a> {
    /// Deletes a server locally and on its daemon.
    ///
    /// Subusers, permissions, OAuth tokens, OAuth clients and the server row are removed
    /// in one transaction before `DELETE /server/{hash}` is sent. The transaction is
    /// committed when the daemon succeeds, or regardless when `force` is set.
    ///
    /// # Arguments
    /// - `context` - The loaded server and its node
    /// - `force` - Remove the panel rows even if the daemon call fails
    ///
    /// # Returns
    /// - `Ok(Deleted)` - Removed on both sides
    /// - `Ok(ForceDeleted)` - Removed from the panel; the daemon object may remain
    /// - `Ok(Failed)` - Daemon failed without `force`; nothing changed
    /// - `Err(AppError)` - Database error
    pub async fn delete(
        &self,
        context: &ServerContext,
        force: bool,
    ) -> Result<DeleteServerOutcome, AppError> {
        let bearer = OAuthService::new(self.db).panel_access_token().await?;

        let txn = self.db.begin().await?;

        ServerRepository::new(&txn)
            .delete_with_access(context.server.id)
            .await?;

        let endpoint = DaemonEndpoint::from_node(&context.node);
        match self
            .daemon
            .delete_server(&endpoint, &bearer, &context.server.hash)
            .await
        {
            Ok(()) => {
                txn.commit().await?;
                tracing::info!("Deleted server {}", context.server.hash);

                Ok(DeleteServerOutcome::Deleted)
            }
            Err(e) if force => {
                txn.commit().await?;
                tracing::warn!(
                    "Force deleted server {} after daemon error: {}",
                    context.server.hash,
                    e
                );

                Ok(DeleteServerOutcome::ForceDeleted(e))
            }
            Err(e) => {
                txn.rollback().await?;
                tracing::warn!(
                    "Daemon at {} failed to delete server {}: {}",
                    endpoint,
                    context.server.hash,
                    e
                );

                Ok(DeleteServerOutcome::Failed(e))
            }
        }
    }
}
