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
                    .table(Permission::Table)
                    .if_not_exists()
                    .col(pk_auto(Permission::Id))
                    .col(integer(Permission::User))
                    .col(integer(Permission::Server))
                    .col(string(Permission::Permission))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permission_user")
                            .from(Permission::Table, Permission::User)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permission_server")
                            .from(Permission::Table, Permission::Server)
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
            .drop_table(Table::drop().table(Permission::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Permission {
    #[sea_orm(iden = "permissions")]
    Table,
    Id,
    User,
    Server,
    Permission,
}
