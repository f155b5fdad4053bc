//! Migration: Create careers, academic_groups and students tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            r#"
            CREATE TABLE careers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                code TEXT NOT NULL UNIQUE,
                icon TEXT
            )
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE TABLE academic_groups (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                career_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                code TEXT NOT NULL UNIQUE,
                FOREIGN KEY (career_id) REFERENCES careers(id)
            )
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE TABLE students (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                group_id INTEGER NOT NULL,
                enrollment_id TEXT NOT NULL UNIQUE,
                last_name TEXT NOT NULL,
                first_name TEXT NOT NULL,
                FOREIGN KEY (group_id) REFERENCES academic_groups(id)
            )
            "#,
        )
        .await?;

        db.execute_unprepared(
            "CREATE INDEX idx_academic_groups_career_id ON academic_groups(career_id)",
        )
        .await?;
        db.execute_unprepared("CREATE INDEX idx_students_group_id ON students(group_id)")
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS students").await?;
        db.execute_unprepared("DROP TABLE IF EXISTS academic_groups")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS careers").await?;
        Ok(())
    }
}
