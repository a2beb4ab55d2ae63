pub use sea_orm_migration::prelude::*;

mod m20251220_000001_create_user_table;
mod m20251220_000002_create_location_table;
mod m20251220_000003_create_node_table;
mod m20251220_000004_create_server_table;
mod m20251220_000005_create_subuser_table;
mod m20251220_000006_create_permission_table;
mod m20251220_000007_create_oauth_client_table;
mod m20251220_000008_create_oauth_access_token_table;
mod m20251220_000009_create_account_change_table;
mod m20251220_000010_create_autodeploy_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251220_000001_create_user_table::Migration),
            Box::new(m20251220_000002_create_location_table::Migration),
            Box::new(m20251220_000003_create_node_table::Migration),
            Box::new(m20251220_000004_create_server_table::Migration),
            Box::new(m20251220_000005_create_subuser_table::Migration),
            Box::new(m20251220_000006_create_permission_table::Migration),
            Box::new(m20251220_000007_create_oauth_client_table::Migration),
            Box::new(m20251220_000008_create_oauth_access_token_table::Migration),
            Box::new(m20251220_000009_create_account_change_table::Migration),
            Box::new(m20251220_000010_create_autodeploy_table::Migration),
        ]
    }
}
