// src/handlers/inventory.rs

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
        rbac::{
            PermCreateCategory, PermCreateInflow, PermCreateMaterial, PermCreateOutflow,
            PermCreateUnit, PermDeleteCategory, PermDeleteMaterial, PermDeleteUnit,
            PermUpdateMaterial, RequirePermission,
        },
        validation::ValidatedJson,
    },
    models::inventory::{
        CreateCategoryPayload, CreateUnitPayload, LedgerEntryPayload, MaterialPayload,
        MaterialWithUnit, MovementDirection,
    },
};

// ---
// Categorias
// ---
pub async fn get_all_categories(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.inventory_service.get_all_categories().await?;
    Ok((StatusCode::OK, Json(categories)))
}

pub async fn create_category(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermCreateCategory>,
    ValidatedJson(payload): ValidatedJson<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    let category = app_state.inventory_service.create_category(&payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn delete_category(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermDeleteCategory>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Unidades de medida
// ---
pub async fn get_all_units(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let units = app_state.inventory_service.get_all_units().await?;
    Ok((StatusCode::OK, Json(units)))
}

pub async fn create_unit(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermCreateUnit>,
    ValidatedJson(payload): ValidatedJson<CreateUnitPayload>,
) -> Result<impl IntoResponse, AppError> {
    let unit = app_state.inventory_service.create_unit(&payload).await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

pub async fn delete_unit(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermDeleteUnit>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.delete_unit(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Materiais
// ---
pub async fn get_all_materials(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let materials = app_state.inventory_service.get_active_materials().await?;
    Ok((StatusCode::OK, Json(materials)))
}

// GET /api/materials/with-units
#[utoipa::path(
    get,
    path = "/api/materials/with-units",
    tag = "Materiais",
    responses(
        (status = 200, description = "Materiais ativos com a unidade de medida", body = Vec<MaterialWithUnit>),
        (status = 401, description = "Não autenticado")
    ),
    security(("session" = []))
)]
pub async fn get_materials_with_units(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let materials = app_state.inventory_service.get_materials_with_units().await?;
    Ok((StatusCode::OK, Json(materials)))
}

pub async fn create_material(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermCreateMaterial>,
    ValidatedJson(payload): ValidatedJson<MaterialPayload>,
) -> Result<impl IntoResponse, AppError> {
    let material = app_state.inventory_service.create_material(&payload).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

pub async fn update_material(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermUpdateMaterial>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<MaterialPayload>,
) -> Result<impl IntoResponse, AppError> {
    let material = app_state.inventory_service.update_material(id, &payload).await?;
    Ok((StatusCode::OK, Json(material)))
}

pub async fn delete_material(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermDeleteMaterial>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.deactivate_material(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Entradas / Saídas (livro-razão)
// ---
pub async fn get_inflows(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.inventory_service.get_ledger(MovementDirection::Inflow).await?;
    Ok((StatusCode::OK, Json(entries)))
}

pub async fn create_inflow(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermCreateInflow>,
    ValidatedJson(payload): ValidatedJson<LedgerEntryPayload>,
) -> Result<impl IntoResponse, AppError> {
    let entry = app_state
        .inventory_service
        .record_movement(MovementDirection::Inflow, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_outflows(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.inventory_service.get_ledger(MovementDirection::Outflow).await?;
    Ok((StatusCode::OK, Json(entries)))
}

pub async fn create_outflow(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermCreateOutflow>,
    ValidatedJson(payload): ValidatedJson<LedgerEntryPayload>,
) -> Result<impl IntoResponse, AppError> {
    let entry = app_state
        .inventory_service
        .record_movement(MovementDirection::Outflow, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
