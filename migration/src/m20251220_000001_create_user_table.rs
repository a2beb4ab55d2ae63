use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_null(User::Username).unique_key())
                    .col(string_uniq(User::Email))
                    .col(string_null(User::Password))
                    .col(big_integer(User::RegisterTime).default(0))
                    .col(string_null(User::SessionId))
                    .col(string_null(User::SessionIp))
                    .col(boolean(User::RootAdmin).default(false))
                    .col(boolean(User::NotifyLoginS).default(false))
                    .col(boolean(User::NotifyLoginF).default(false))
                    .col(boolean(User::UseTotp).default(false))
                    .col(string_null(User::TotpSecret))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    Password,
    RegisterTime,
    SessionId,
    SessionIp,
    RootAdmin,
    NotifyLoginS,
    NotifyLoginF,
    UseTotp,
    TotpSecret,
}
