//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_user;
mod m20240101_000002_create_car;
mod m20240101_000003_create_package;
mod m20240101_000004_create_service_record;
mod m20240101_000005_create_payment;
mod m20240101_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_user::Migration),
            Box::new(m20240101_000002_create_car::Migration),
            Box::new(m20240101_000003_create_package::Migration),
            Box::new(m20240101_000004_create_service_record::Migration),
            Box::new(m20240101_000005_create_payment::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000006_add_indexes::Migration),
        ]
    }
}
