//! Academic catalog models (careers, groups, students).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{academic_group, career, student};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CareerItem {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "icono")]
    pub icon: Option<String>,
}

impl From<career::Model> for CareerItem {
    fn from(m: career::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            code: m.code,
            icon: m.icon,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupItem {
    pub id: i32,
    #[serde(rename = "carrera_id")]
    pub career_id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigo")]
    pub code: String,
}

impl From<academic_group::Model> for GroupItem {
    fn from(m: academic_group::Model) -> Self {
        Self {
            id: m.id,
            career_id: m.career_id,
            name: m.name,
            code: m.code,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentItem {
    pub id: i32,
    #[serde(rename = "grupo_id")]
    pub group_id: i32,
    #[serde(rename = "matricula")]
    pub enrollment_id: String,
    #[serde(rename = "apellidos")]
    pub last_name: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
}

impl From<student::Model> for StudentItem {
    fn from(m: student::Model) -> Self {
        Self {
            id: m.id,
            group_id: m.group_id,
            enrollment_id: m.enrollment_id,
            last_name: m.last_name,
            first_name: m.first_name,
        }
    }
}

/// Body of `POST /api/alumnos`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateStudentRequest {
    #[serde(rename = "grupo_id")]
    pub group_id: Option<i32>,
    #[serde(rename = "matricula", default)]
    pub enrollment_id: String,
    #[serde(rename = "apellidos", default)]
    pub last_name: String,
    #[serde(rename = "nombre", default)]
    pub first_name: String,
}

/// Presence-checked, trimmed student fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub group_id: i32,
    pub enrollment_id: String,
    pub last_name: String,
    pub first_name: String,
}

impl CreateStudentRequest {
    /// Trim every field and require all of them.
    pub fn validate(&self) -> AppResult<NewStudent> {
        let enrollment_id = self.enrollment_id.trim();
        let last_name = self.last_name.trim();
        let first_name = self.first_name.trim();

        match self.group_id {
            Some(group_id)
                if !enrollment_id.is_empty() && !last_name.is_empty() && !first_name.is_empty() =>
            {
                Ok(NewStudent {
                    group_id,
                    enrollment_id: enrollment_id.to_string(),
                    last_name: last_name.to_string(),
                    first_name: first_name.to_string(),
                })
            }
            _ => Err(AppError::InvalidInput(
                "Faltan campos obligatorios: grupo_id, matricula, apellidos, nombre".to_string(),
            )),
        }
    }
}
