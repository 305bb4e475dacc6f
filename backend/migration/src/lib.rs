pub use sea_orm_migration::prelude::*;

mod m20241106_000001_create_countries_table;
mod m20241106_000002_create_learners_table;
mod m20241106_000003_create_admins_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241106_000001_create_countries_table::Migration),
            Box::new(m20241106_000002_create_learners_table::Migration),
            Box::new(m20241106_000003_create_admins_table::Migration),
        ]
    }
}
