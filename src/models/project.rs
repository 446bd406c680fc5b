// src/models/project.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::validators::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    #[schema(example = "Torre A")]
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    #[validate(
        length(min = 1, max = 100, message = "O nome do projeto deve ter entre 1 e 100 caracteres."),
        custom(function = "validate_not_blank")
    )]
    #[schema(example = "Torre A")]
    pub name: String,

    #[validate(length(max = 500, message = "A descrição deve ter no máximo 500 caracteres."))]
    pub description: Option<String>,
}

impl ProjectPayload {
    /// Nome sem espaços nas pontas; é o que vai para o banco e para a checagem de duplicidade.
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }
}
