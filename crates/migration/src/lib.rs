pub use sea_orm_migration::prelude::*;

mod m20260301_000000_users;
mod m20260301_000100_catalog;
mod m20260301_000200_records;
mod m20260301_000300_budgets;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000000_users::Migration),
            Box::new(m20260301_000100_catalog::Migration),
            Box::new(m20260301_000200_records::Migration),
            Box::new(m20260301_000300_budgets::Migration),
        ]
    }
}
