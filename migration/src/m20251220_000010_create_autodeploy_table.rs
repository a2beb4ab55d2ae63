use sea_orm_migration::{prelude::*, schema::*};

use super::m20251220_000003_create_node_table::Node;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Autodeploy::Table)
                    .if_not_exists()
                    .col(pk_auto(Autodeploy::Id))
                    .col(integer(Autodeploy::Node))
                    .col(string_uniq(Autodeploy::Code))
                    .col(big_integer(Autodeploy::Expires))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_autodeploy_node")
                            .from(Autodeploy::Table, Autodeploy::Node)
                            .to(Node::Table, Node::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Autodeploy::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Autodeploy {
    Table,
    Id,
    Node,
    Code,
    Expires,
}
