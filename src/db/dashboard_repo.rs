// src/db/dashboard_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use crate::{
    common::error::AppError,
    models::{
        dashboard::{MaterialLedgerTotals, RecentMovementRow},
        inventory::MovementDirection,
    },
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // 1. Totais do livro-razão por material ativo.
    // Material sem movimentação volta com 0 nos dois lados (LEFT JOIN + COALESCE).
    pub async fn get_ledger_totals<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<MaterialLedgerTotals>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, MaterialLedgerTotals>(
            r#"
            SELECT
                m.id AS material_id,
                m.name AS material_name,
                c.name AS category_name,
                m.min_stock_level,
                COALESCE(i.total, 0) AS total_inflow,
                COALESCE(o.total, 0) AS total_outflow
            FROM materials m
            JOIN categories c ON c.id = m.category_id
            LEFT JOIN (
                SELECT material_id, SUM(quantity) AS total
                FROM inflows
                GROUP BY material_id
            ) i ON i.material_id = m.id
            LEFT JOIN (
                SELECT material_id, SUM(quantity) AS total
                FROM outflows
                GROUP BY material_id
            ) o ON o.material_id = m.id
            WHERE m.is_active
            ORDER BY m.name ASC, m.id ASC
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    // 2. Últimas N movimentações de um dos lados do livro-razão
    pub async fn get_recent_movements<'e, E>(
        &self,
        executor: E,
        direction: MovementDirection,
        limit: i64,
    ) -> Result<Vec<RecentMovementRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT
                l.id, l.material_id, m.name AS material_name, l.quantity,
                l.date, l.person, p.name AS project_name, l.created_at
            FROM {} l
            JOIN materials m ON m.id = l.material_id
            LEFT JOIN projects p ON p.id = l.project_id
            ORDER BY l.date DESC, l.created_at DESC
            LIMIT $1
            "#,
            direction.table()
        );

        let rows = sqlx::query_as::<_, RecentMovementRow>(&sql)
            .bind(limit)
            .fetch_all(executor)
            .await?;

        Ok(rows)
    }
}
