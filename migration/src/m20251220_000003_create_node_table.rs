use sea_orm_migration::{prelude::*, schema::*};

use super::m20251220_000002_create_location_table::Location;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Node::Table)
                    .if_not_exists()
                    .col(pk_auto(Node::Id))
                    .col(string_uniq(Node::Name))
                    .col(integer(Node::Location))
                    .col(string(Node::Ip))
                    .col(integer(Node::DaemonListen).default(5656))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_node_location")
                            .from(Node::Table, Node::Location)
                            .to(Location::Table, Location::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Node::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Node {
    #[sea_orm(iden = "nodes")]
    Table,
    Id,
    Name,
    Location,
    Ip,
    DaemonListen,
}
