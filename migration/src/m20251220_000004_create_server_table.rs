use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20251220_000001_create_user_table::User, m20251220_000003_create_node_table::Node,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Server::Table)
                    .if_not_exists()
                    .col(pk_auto(Server::Id))
                    .col(string_uniq(Server::Hash))
                    .col(string_uniq(Server::DaemonSecret))
                    .col(integer(Server::Node))
                    .col(string_uniq(Server::Name))
                    .col(integer(Server::OwnerId))
                    .col(boolean(Server::Active).default(true))
                    .col(big_integer(Server::DateAdded))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_server_node")
                            .from(Server::Table, Server::Node)
                            .to(Node::Table, Node::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_server_owner")
                            .from(Server::Table, Server::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Server::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Server {
    #[sea_orm(iden = "servers")]
    Table,
    Id,
    Hash,
    DaemonSecret,
    Node,
    Name,
    OwnerId,
    Active,
    DateAdded,
}
