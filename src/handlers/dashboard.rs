// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::dashboard::DashboardResponse,
};

// GET /api/inventory/dashboard
#[utoipa::path(
    get,
    path = "/api/inventory/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Resumo, saldos, alertas e atividades recentes", body = DashboardResponse),
        (status = 401, description = "Não autenticado"),
        (status = 500, description = "Falha ao consultar o livro-razão")
    ),
    security(("session" = []))
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let dashboard = app_state.dashboard_service.get_dashboard().await?;
    Ok((StatusCode::OK, Json(dashboard)))
}

// GET /api/inventory/stock-levels (todos os materiais ativos, sem corte)
pub async fn get_stock_levels(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let levels = app_state.dashboard_service.compute_stock_levels().await?;
    Ok((StatusCode::OK, Json(levels)))
}
