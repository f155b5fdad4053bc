//! Migration: Seed careers and their groups.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, Statement};

/// (id, name, code, icon)
const SEED_CAREERS: [(i32, &str, &str, &str); 2] = [
    (1, "Ingeniería en Software", "IS", "fa-laptop-code"),
    (2, "Ingeniería en Manufactura", "ITM", "fa-industry"),
];

/// (id, career_id, name, code)
const SEED_GROUPS: [(i32, i32, &str, &str); 3] = [
    (1, 1, "1925° IS - INGENIERÍA DE SOFTWARE", "1925IS"),
    (2, 1, "2925° IS - INGENIERÍA DE SOFTWARE", "2925IS"),
    (3, 2, "1625° ITM - Ingeniería en Manufactura", "1625ITM"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = manager.get_database_backend();

        for (id, name, code, icon) in SEED_CAREERS {
            db.execute_raw(Statement::from_sql_and_values(
                backend,
                "INSERT OR IGNORE INTO careers (id, name, code, icon) VALUES (?, ?, ?, ?)",
                [id.into(), name.into(), code.into(), icon.into()],
            ))
            .await?;
        }

        for (id, career_id, name, code) in SEED_GROUPS {
            db.execute_raw(Statement::from_sql_and_values(
                backend,
                "INSERT OR IGNORE INTO academic_groups (id, career_id, name, code) VALUES (?, ?, ?, ?)",
                [id.into(), career_id.into(), name.into(), code.into()],
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DELETE FROM academic_groups WHERE id BETWEEN 1 AND 3")
            .await?;
        db.execute_unprepared("DELETE FROM careers WHERE id BETWEEN 1 AND 2")
            .await?;
        Ok(())
    }
}
