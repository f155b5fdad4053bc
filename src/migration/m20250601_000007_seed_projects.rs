//! Migration: Seed the nine fixed greenhouse projects.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, Statement};

/// (id, name, description)
const SEED_PROJECTS: [(i32, &str, &str); 9] = [
    (1, "Bomba/Sistema de Riego", "Sistema de riego automatizado para el invernadero"),
    (2, "Hidroponía", "Cultivo de plantas usando soluciones minerales en lugar de suelo agrícola"),
    (3, "Composta", "Producción de abono orgánico"),
    (4, "Germinación", "Proceso de desarrollo de plantas a partir de semillas"),
    (5, "Iluminación", "Sistema de iluminación para el invernadero"),
    (6, "Hotel de Insectos", "Estructura para albergar insectos beneficiosos"),
    (7, "Producto Pomada", "Elaboración de pomadas con plantas medicinales"),
    (8, "Eólico", "Sistema de energía eólica para el invernadero"),
    (9, "Mantenimiento", "Mantenimiento general del invernadero"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = manager.get_database_backend();

        for (id, name, description) in SEED_PROJECTS {
            db.execute_raw(Statement::from_sql_and_values(
                backend,
                "INSERT OR IGNORE INTO projects (id, name, description) VALUES (?, ?, ?)",
                [id.into(), name.into(), description.into()],
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DELETE FROM projects WHERE id BETWEEN 1 AND 9")
            .await?;

        Ok(())
    }
}
