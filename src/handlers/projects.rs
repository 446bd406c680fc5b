// src/handlers/projects.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{PermCreateProject, PermDeleteProject, PermUpdateProject, RequirePermission},
        validation::ValidatedJson,
    },
    models::project::{Project, ProjectPayload},
};

// GET /api/projects
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "Projetos",
    responses(
        (status = 200, description = "Projetos ativos ordenados por nome", body = Vec<Project>),
        (status = 401, description = "Não autenticado")
    ),
    security(("session" = []))
)]
pub async fn list_projects(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let projects = app_state.project_service.list_active().await?;
    Ok((StatusCode::OK, Json(projects)))
}

// POST /api/projects
#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "Projetos",
    request_body = ProjectPayload,
    responses(
        (status = 201, description = "Projeto criado", body = Project),
        (status = 400, description = "Payload inválido ou nome já existente"),
        (status = 401, description = "Não autenticado"),
        (status = 403, description = "Sem permissão")
    ),
    security(("session" = []))
)]
pub async fn create_project(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermCreateProject>,
    ValidatedJson(payload): ValidatedJson<ProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    let project = app_state.project_service.create_project(&payload).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

// PUT /api/projects/{id}
pub async fn update_project(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermUpdateProject>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    let project = app_state.project_service.update_project(id, &payload).await?;
    Ok((StatusCode::OK, Json(project)))
}

// DELETE /api/projects/{id} (desativa)
pub async fn delete_project(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermDeleteProject>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.project_service.deactivate_project(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
