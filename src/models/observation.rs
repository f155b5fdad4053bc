//! Observation log models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::observation;

/// Form body of `POST /observaciones`.
#[derive(Debug, Deserialize)]
pub struct ObservationForm {
    #[serde(rename = "observacion", default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ObservationItem {
    pub id: i32,
    #[serde(rename = "texto")]
    pub text: String,
    #[serde(rename = "fecha")]
    pub created_at: DateTime<Utc>,
}

impl From<observation::Model> for ObservationItem {
    fn from(m: observation::Model) -> Self {
        Self {
            id: m.id,
            text: m.text,
            created_at: m.created_at,
        }
    }
}
