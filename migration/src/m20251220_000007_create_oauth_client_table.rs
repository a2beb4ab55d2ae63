use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20251220_000001_create_user_table::User, m20251220_000004_create_server_table::Server,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OauthClient::Table)
                    .if_not_exists()
                    .col(pk_auto(OauthClient::Id))
                    .col(string_uniq(OauthClient::ClientId))
                    .col(string(OauthClient::ClientSecret))
                    .col(integer_null(OauthClient::UserId))
                    .col(integer_null(OauthClient::ServerId))
                    .col(text(OauthClient::Scopes))
                    .col(string(OauthClient::Name))
                    .col(string(OauthClient::Description))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_oauth_client_user")
                            .from(OauthClient::Table, OauthClient::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_oauth_client_server")
                            .from(OauthClient::Table, OauthClient::ServerId)
                            .to(Server::Table, Server::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OauthClient::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum OauthClient {
    #[sea_orm(iden = "oauth_clients")]
    Table,
    Id,
    ClientId,
    ClientSecret,
    UserId,
    ServerId,
    Scopes,
    Name,
    Description,
}
