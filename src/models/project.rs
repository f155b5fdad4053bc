//! Project models: fetch projection and allow-listed update payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::entity::project;
use crate::error::{AppError, AppResult};

/// Fixed projection returned by `GET /get-proyecto/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProjectDetail {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "responsable")]
    pub owner: Option<String>,
    #[serde(rename = "fecha_inicio")]
    pub start_date: Option<String>,
    #[serde(rename = "avance")]
    pub progress: String,
    #[serde(rename = "inversion")]
    pub investment: Option<String>,
    #[serde(rename = "recursos")]
    pub resources: Option<String>,
}

impl From<project::Model> for ProjectDetail {
    fn from(m: project::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            status: m.status,
            owner: m.owner,
            start_date: m.start_date,
            progress: m.progress,
            investment: m.investment,
            resources: m.resources,
        }
    }
}

/// Project row as listed on the projects page, including the last edit time.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub detail: ProjectDetail,
    #[serde(rename = "ultima_actualizacion")]
    pub updated_at: DateTime<Utc>,
}

impl From<project::Model> for ProjectSummary {
    fn from(m: project::Model) -> Self {
        let updated_at = m.updated_at;
        Self {
            detail: m.into(),
            updated_at,
        }
    }
}

/// Body of `POST /actualizar-proyecto/{id}`.
///
/// Only these keys are writable; anything else is rejected while parsing.
/// Nullable columns use `Option<Option<_>>` so an explicit `null` clears the
/// value while an absent key leaves it untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ProjectUpdate {
    #[serde(rename = "nombre", default, deserialize_with = "required_field")]
    pub name: Option<String>,
    #[serde(
        rename = "descripcion",
        default,
        deserialize_with = "nullable_field"
    )]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(rename = "estado", default, deserialize_with = "required_field")]
    pub status: Option<String>,
    #[serde(
        rename = "responsable",
        default,
        deserialize_with = "nullable_field"
    )]
    #[schema(value_type = Option<String>)]
    pub owner: Option<Option<String>>,
    #[serde(
        rename = "fecha_inicio",
        default,
        deserialize_with = "nullable_field"
    )]
    #[schema(value_type = Option<String>)]
    pub start_date: Option<Option<String>>,
    #[serde(rename = "avance", default, deserialize_with = "required_field")]
    pub progress: Option<String>,
    #[serde(rename = "inversion", default, deserialize_with = "nullable_field")]
    #[schema(value_type = Option<String>)]
    pub investment: Option<Option<String>>,
    #[serde(rename = "recursos", default, deserialize_with = "nullable_field")]
    #[schema(value_type = Option<String>)]
    pub resources: Option<Option<String>>,
}

/// Required columns: a present key must carry a string, `null` is rejected.
fn required_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

/// Distinguish a present `null` (`Some(None)`) from an absent key (`None`).
fn nullable_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl ProjectUpdate {
    /// True when no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.owner.is_none()
            && self.start_date.is_none()
            && self.progress.is_none()
            && self.investment.is_none()
            && self.resources.is_none()
    }

    /// Reject empty payloads and blank required columns.
    pub fn validate(&self) -> AppResult<()> {
        if self.is_empty() {
            return Err(AppError::InvalidInput(
                "Datos no proporcionados".to_string(),
            ));
        }

        let required = [
            ("nombre", &self.name),
            ("estado", &self.status),
            ("avance", &self.progress),
        ];
        for (key, value) in required {
            if let Some(v) = value
                && v.trim().is_empty()
            {
                return Err(AppError::InvalidInput(format!(
                    "El campo '{}' no puede estar vacío",
                    key
                )));
            }
        }

        Ok(())
    }
}
