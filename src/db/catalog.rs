//! Database operations for careers, groups and students.

use sea_orm::*;

use crate::entity::academic_group::{self, Entity as Group};
use crate::entity::career::{self, Entity as Career};
use crate::entity::student::{self, Entity as Student};
use crate::error::{AppError, AppResult};
use crate::models::NewStudent;

/// List careers ordered by id.
pub async fn list_careers(db: &DatabaseConnection) -> AppResult<Vec<career::Model>> {
    Ok(Career::find()
        .order_by_asc(career::Column::Id)
        .all(db)
        .await?)
}

pub async fn find_career(db: &DatabaseConnection, id: i32) -> AppResult<Option<career::Model>> {
    Ok(Career::find_by_id(id).one(db).await?)
}

/// Groups belonging to a career, ordered by id.
pub async fn list_groups_by_career(
    db: &DatabaseConnection,
    career_id: i32,
) -> AppResult<Vec<academic_group::Model>> {
    Ok(Group::find()
        .filter(academic_group::Column::CareerId.eq(career_id))
        .order_by_asc(academic_group::Column::Id)
        .all(db)
        .await?)
}

pub async fn find_group(
    db: &DatabaseConnection,
    id: i32,
) -> AppResult<Option<academic_group::Model>> {
    Ok(Group::find_by_id(id).one(db).await?)
}

/// A group together with its career.
pub async fn find_group_with_career(
    db: &DatabaseConnection,
    id: i32,
) -> AppResult<Option<(academic_group::Model, Option<career::Model>)>> {
    Ok(Group::find_by_id(id)
        .find_also_related(Career)
        .one(db)
        .await?)
}

/// Students of a group, ordered by last name then first name.
pub async fn list_students_by_group(
    db: &DatabaseConnection,
    group_id: i32,
) -> AppResult<Vec<student::Model>> {
    Ok(Student::find()
        .filter(student::Column::GroupId.eq(group_id))
        .order_by_asc(student::Column::LastName)
        .order_by_asc(student::Column::FirstName)
        .all(db)
        .await?)
}

/// Insert a student, surfacing a duplicate enrollment id as `AppError::Duplicate`.
pub async fn insert_student(
    db: &DatabaseConnection,
    new: &NewStudent,
) -> AppResult<student::Model> {
    let model = student::ActiveModel {
        id: NotSet,
        group_id: Set(new.group_id),
        enrollment_id: Set(new.enrollment_id.clone()),
        last_name: Set(new.last_name.clone()),
        first_name: Set(new.first_name.clone()),
    };

    match model.insert(db).await {
        Ok(m) => Ok(m),
        Err(e) => match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::Duplicate(format!(
                "La matrícula {} ya está registrada",
                new.enrollment_id
            ))),
            _ => Err(AppError::Database(format!("Failed to insert student: {}", e))),
        },
    }
}

/// Delete a student. Returns true if a row was removed.
pub async fn delete_student(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
    let result = Student::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
