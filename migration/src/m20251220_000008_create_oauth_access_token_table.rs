use sea_orm_migration::{prelude::*, schema::*};

use super::m20251220_000007_create_oauth_client_table::OauthClient;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OauthAccessToken::Table)
                    .if_not_exists()
                    .col(pk_auto(OauthAccessToken::Id))
                    .col(string_uniq(OauthAccessToken::AccessToken))
                    .col(integer(OauthAccessToken::OauthClientId))
                    .col(big_integer_null(OauthAccessToken::ExpireTime))
                    .col(text(OauthAccessToken::Scopes))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_oauth_access_token_client")
                            .from(OauthAccessToken::Table, OauthAccessToken::OauthClientId)
                            .to(OauthClient::Table, OauthClient::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OauthAccessToken::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum OauthAccessToken {
    #[sea_orm(iden = "oauth_access_tokens")]
    Table,
    Id,
    AccessToken,
    OauthClientId,
    ExpireTime,
    Scopes,
}
