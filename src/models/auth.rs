// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{rbac::Role, validators::validate_not_blank};

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    // Guardado como TEXT; convertido para `Role` na borda
    pub role: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Role {
        Role::from_claim(&self.role)
    }
}

/// Sessão decodificada do token assinado. Vive apenas durante a requisição.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: Uuid,
    pub username: String,
    #[schema(value_type = String, example = "EDITOR")]
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,        // Subject (ID do usuário)
    pub username: String,
    pub role: String,     // Texto livre no token; validado ao decodificar
    pub exp: usize,       // Expiration time
    pub iat: usize,       // Issued At
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignInPayload {
    #[validate(length(min = 1, message = "O usuário é obrigatório."))]
    pub username: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

// Formulário HTML da página de login
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub callback_url: Option<String>,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: Session,
}

// Criação de usuário (somente SUPER_USER)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserPayload {
    #[validate(
        length(min = 3, max = 64, message = "O usuário deve ter entre 3 e 64 caracteres."),
        custom(function = "validate_not_blank")
    )]
    pub username: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    pub role: Role,
}
