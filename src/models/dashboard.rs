// src/models/dashboard.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::inventory::MovementDirection;

// Linha crua do banco: totais do livro-razão por material (já com COALESCE 0)
#[derive(Debug, Clone, FromRow)]
pub struct MaterialLedgerTotals {
    pub material_id: Uuid,
    pub material_name: String,
    pub category_name: String,
    pub min_stock_level: Option<Decimal>,
    pub total_inflow: Decimal,
    pub total_outflow: Decimal,
}

// 1. Saldo derivado por material (nunca persistido)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub material_id: Uuid,
    pub material_name: String,
    pub category_name: String,
    pub current_stock: Decimal,
    pub min_stock_level: Option<Decimal>,
    pub total_inflow: Decimal,
    pub total_outflow: Decimal,
    pub low_stock: bool,
    pub out_of_stock: bool,
}

// 2. Cards do topo
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_materials: usize,
    pub low_stock_materials: usize,
    pub out_of_stock_materials: usize,
    /// Sempre zero: ainda não existe modelo de preço para os materiais.
    pub total_stock_value: Decimal,
}

// Linha crua de movimentação recente (entrada ou saída)
#[derive(Debug, Clone, FromRow)]
pub struct RecentMovementRow {
    pub id: Uuid,
    pub material_id: Uuid,
    pub material_name: String,
    pub quantity: Decimal,
    pub date: NaiveDate,
    pub person: String,
    pub project_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

// 3. Feed de atividades recentes
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub direction: MovementDirection,
    pub material_id: Uuid,
    pub material_name: String,
    pub quantity: Decimal,
    pub date: NaiveDate,
    pub person: String,
    pub project_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RecentActivity {
    pub fn from_row(direction: MovementDirection, row: RecentMovementRow) -> Self {
        Self {
            id: row.id,
            direction,
            material_id: row.material_id,
            material_name: row.material_name,
            quantity: row.quantity,
            date: row.date,
            person: row.person,
            project_name: row.project_name,
            created_at: row.created_at,
        }
    }
}

// Resposta completa de GET /api/inventory/dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub summary: DashboardSummary,
    pub stock_levels: Vec<StockLevel>,
    pub recent_activities: Vec<RecentActivity>,
    pub low_stock_alerts: Vec<StockLevel>,
}
