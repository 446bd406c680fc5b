// src/handlers/users.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        rbac::{PermManageUsers, RequirePermission},
        validation::ValidatedJson,
    },
    models::auth::CreateUserPayload,
};

// GET /api/users (somente SUPER_USER)
pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermManageUsers>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.auth_service.list_users().await?;
    Ok((StatusCode::OK, Json(users)))
}

// POST /api/users (somente SUPER_USER)
pub async fn create_user(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermManageUsers>,
    ValidatedJson(payload): ValidatedJson<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .auth_service
        .create_user(payload.username.trim(), &payload.password, payload.role)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}
