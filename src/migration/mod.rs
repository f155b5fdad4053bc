//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_admins;
mod m20250601_000002_create_projects;
mod m20250601_000003_create_observations;
mod m20250601_000004_create_reports;
mod m20250601_000005_create_academic_catalog;
mod m20250601_000006_create_attendance;
mod m20250601_000007_seed_projects;
mod m20250601_000008_seed_academic_catalog;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_admins::Migration),
            Box::new(m20250601_000002_create_projects::Migration),
            Box::new(m20250601_000003_create_observations::Migration),
            Box::new(m20250601_000004_create_reports::Migration),
            Box::new(m20250601_000005_create_academic_catalog::Migration),
            Box::new(m20250601_000006_create_attendance::Migration),
            Box::new(m20250601_000007_seed_projects::Migration),
            Box::new(m20250601_000008_seed_academic_catalog::Migration),
        ]
    }
}
