use sea_orm_migration::{prelude::*, schema::*};

use super::m20251220_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccountChange::Table)
                    .if_not_exists()
                    .col(pk_auto(AccountChange::Id))
                    .col(integer_null(AccountChange::UserId))
                    .col(string(AccountChange::Type))
                    .col(string(AccountChange::Content))
                    .col(string_uniq(AccountChange::Key))
                    .col(big_integer(AccountChange::Time))
                    .col(boolean(AccountChange::Verified).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_change_user")
                            .from(AccountChange::Table, AccountChange::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccountChange::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AccountChange {
    Table,
    Id,
    UserId,
    Type,
    Content,
    Key,
    Time,
    Verified,
}
