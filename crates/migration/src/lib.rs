//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_user;
mod m20250101_000002_create_car;
mod m20250101_000003_create_accessory;
mod m20250101_000004_create_car_image;
mod m20250101_000005_create_rental_request;
mod m20250101_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_user::Migration),
            Box::new(m20250101_000002_create_car::Migration),
            Box::new(m20250101_000003_create_accessory::Migration),
            Box::new(m20250101_000004_create_car_image::Migration),
            Box::new(m20250101_000005_create_rental_request::Migration),
            // Indexes should always be applied last
            Box::new(m20250101_000006_add_indexes::Migration),
        ]
    }
}
