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
                    .table(Subuser::Table)
                    .if_not_exists()
                    .col(pk_auto(Subuser::Id))
                    .col(integer(Subuser::UserId))
                    .col(integer(Subuser::Server))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subuser_user")
                            .from(Subuser::Table, Subuser::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subuser_server")
                            .from(Subuser::Table, Subuser::Server)
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
            .drop_table(Table::drop().table(Subuser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Subuser {
    #[sea_orm(iden = "subusers")]
    Table,
    Id,
    UserId,
    Server,
}
