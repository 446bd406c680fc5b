// src/services/dashboard_service.rs

use rust_decimal::Decimal;

use crate::{
    common::{db_utils::begin_read_snapshot, error::AppError},
    db::DashboardRepository,
    models::{
        dashboard::{
            DashboardResponse, DashboardSummary, MaterialLedgerTotals, RecentActivity,
            RecentMovementRow, StockLevel,
        },
        inventory::MovementDirection,
    },
};

pub const STOCK_LEVELS_SHOWN: usize = 20;
pub const LOW_STOCK_ALERTS_SHOWN: usize = 5;
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    /// Saldos de todos os materiais ativos, recalculados do livro-razão.
    pub async fn compute_stock_levels(&self) -> Result<Vec<StockLevel>, AppError> {
        let rows = self.repo.get_ledger_totals(self.repo.pool()).await?;
        Ok(rows.into_iter().map(stock_level_from_totals).collect())
    }

    /// Dashboard completo. Tudo ou nada: qualquer erro de banco derruba a requisição.
    pub async fn get_dashboard(&self) -> Result<DashboardResponse, AppError> {
        // Snapshot consistente dos dados para as três consultas
        let mut tx = begin_read_snapshot(self.repo.pool()).await?;

        let totals = self.repo.get_ledger_totals(&mut *tx).await?;
        let inflows = self
            .repo
            .get_recent_movements(&mut *tx, MovementDirection::Inflow, RECENT_ACTIVITY_LIMIT as i64)
            .await?;
        let outflows = self
            .repo
            .get_recent_movements(&mut *tx, MovementDirection::Outflow, RECENT_ACTIVITY_LIMIT as i64)
            .await?;

        tx.commit().await?;

        Ok(build_dashboard(totals, inflows, outflows))
    }
}

/// currentStock = entradas - saídas. Baixo estoque e zerado são avaliados de forma independente.
pub fn stock_level_from_totals(row: MaterialLedgerTotals) -> StockLevel {
    let current_stock = row.total_inflow - row.total_outflow;

    let low_stock = match row.min_stock_level {
        Some(min) if min > Decimal::ZERO => current_stock <= min,
        _ => false,
    };
    let out_of_stock = current_stock <= Decimal::ZERO;

    StockLevel {
        material_id: row.material_id,
        material_name: row.material_name,
        category_name: row.category_name,
        current_stock,
        min_stock_level: row.min_stock_level,
        total_inflow: row.total_inflow,
        total_outflow: row.total_outflow,
        low_stock,
        out_of_stock,
    }
}

/// Junta entradas e saídas, mais recentes primeiro, e corta em `limit`.
pub fn merge_recent_activity(
    inflows: Vec<RecentMovementRow>,
    outflows: Vec<RecentMovementRow>,
    limit: usize,
) -> Vec<RecentActivity> {
    let mut activities: Vec<RecentActivity> = inflows
        .into_iter()
        .map(|row| RecentActivity::from_row(MovementDirection::Inflow, row))
        .chain(
            outflows
                .into_iter()
                .map(|row| RecentActivity::from_row(MovementDirection::Outflow, row)),
        )
        .collect();

    activities.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    activities.truncate(limit);
    activities
}

pub fn build_dashboard(
    totals: Vec<MaterialLedgerTotals>,
    inflows: Vec<RecentMovementRow>,
    outflows: Vec<RecentMovementRow>,
) -> DashboardResponse {
    let levels: Vec<StockLevel> = totals.into_iter().map(stock_level_from_totals).collect();

    let summary = DashboardSummary {
        total_materials: levels.len(),
        low_stock_materials: levels.iter().filter(|l| l.low_stock).count(),
        out_of_stock_materials: levels.iter().filter(|l| l.out_of_stock).count(),
        // TODO: trocar pelo valor real quando materiais tiverem custo unitário
        total_stock_value: Decimal::ZERO,
    };

    let low_stock_alerts = levels
        .iter()
        .filter(|l| l.low_stock)
        .take(LOW_STOCK_ALERTS_SHOWN)
        .cloned()
        .collect();

    let mut stock_levels = levels;
    stock_levels.truncate(STOCK_LEVELS_SHOWN);

    DashboardResponse {
        summary,
        stock_levels,
        recent_activities: merge_recent_activity(inflows, outflows, RECENT_ACTIVITY_LIMIT),
        low_stock_alerts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn totals(name: &str, inflows: &[i64], outflows: &[i64], min: Option<i64>) -> MaterialLedgerTotals {
        MaterialLedgerTotals {
            material_id: Uuid::new_v4(),
            material_name: name.to_string(),
            category_name: "Cimento".to_string(),
            min_stock_level: min.map(Decimal::from),
            total_inflow: inflows.iter().copied().map(Decimal::from).sum(),
            total_outflow: outflows.iter().copied().map(Decimal::from).sum(),
        }
    }

    fn movement(day: u32, seq: i64) -> RecentMovementRow {
        RecentMovementRow {
            id: Uuid::new_v4(),
            material_id: Uuid::new_v4(),
            material_name: format!("material-{day}"),
            quantity: Decimal::from(seq + 1),
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            person: "Carlos".to_string(),
            project_name: None,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap() + Duration::minutes(seq),
        }
    }

    #[test]
    fn m1_positive_stock_above_minimum() {
        let level = stock_level_from_totals(totals("M1", &[100, 50], &[30], Some(60)));
        assert_eq!(level.current_stock, Decimal::from(120));
        assert!(!level.low_stock);
        assert!(!level.out_of_stock);
    }

    #[test]
    fn m2_zero_stock_is_both_low_and_out() {
        let level = stock_level_from_totals(totals("M2", &[10], &[10], Some(5)));
        assert_eq!(level.current_stock, Decimal::ZERO);
        assert!(level.low_stock);
        assert!(level.out_of_stock);
    }

    #[test]
    fn material_without_movements_is_zero_and_out_of_stock() {
        let level = stock_level_from_totals(totals("novo", &[], &[], None));
        assert_eq!(level.current_stock, Decimal::ZERO);
        assert!(level.out_of_stock);
        assert!(!level.low_stock);

        let level = stock_level_from_totals(totals("novo", &[], &[], Some(0)));
        assert!(!level.low_stock);
    }

    #[test]
    fn negative_balance_counts_as_out_of_stock() {
        let level = stock_level_from_totals(totals("M3", &[5], &[8], Some(2)));
        assert_eq!(level.current_stock, Decimal::from(-3));
        assert!(level.out_of_stock);
        assert!(level.low_stock);
    }

    #[test]
    fn decimal_sums_do_not_drift() {
        let mut row = totals("areia", &[], &[], None);
        row.total_inflow = (0..10).map(|_| Decimal::new(1, 1)).sum(); // 10 x 0.1
        row.total_outflow = Decimal::new(3, 1);
        let level = stock_level_from_totals(row);
        assert_eq!(level.current_stock, Decimal::new(7, 1));
        assert_eq!(level.current_stock, level.total_inflow - level.total_outflow);
    }

    #[test]
    fn recent_activity_is_capped_sorted_and_tagged() {
        let inflows: Vec<_> = (0..7).map(|i| movement(1 + i as u32 * 2, i)).collect(); // dias ímpares
        let outflows: Vec<_> = (0..7).map(|i| movement(2 + i as u32 * 2, i)).collect(); // dias pares
        let inflow_ids: Vec<_> = inflows.iter().map(|r| r.id).collect();

        let feed = merge_recent_activity(inflows, outflows, RECENT_ACTIVITY_LIMIT);

        assert_eq!(feed.len(), 10);
        assert!(feed.windows(2).all(|w| w[0].date >= w[1].date));
        assert_eq!(feed[0].date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        for activity in &feed {
            let expected = if inflow_ids.contains(&activity.id) {
                MovementDirection::Inflow
            } else {
                MovementDirection::Outflow
            };
            assert_eq!(activity.direction, expected);
        }
    }

    #[test]
    fn same_day_activity_breaks_ties_by_creation_time() {
        let older = movement(5, 0);
        let newer = movement(5, 30);
        let newer_id = newer.id;

        let feed = merge_recent_activity(vec![older], vec![newer], RECENT_ACTIVITY_LIMIT);
        assert_eq!(feed[0].id, newer_id);
        assert_eq!(feed[0].direction, MovementDirection::Outflow);
    }

    #[test]
    fn dashboard_counts_slices_and_placeholder_value() {
        let mut rows = vec![
            totals("M1", &[100, 50], &[30], Some(60)),
            totals("M2", &[10], &[10], Some(5)),
        ];
        for i in 0..25 {
            rows.push(totals(&format!("baixo-{i:02}"), &[1], &[], Some(10)));
        }

        let dashboard = build_dashboard(rows, vec![], vec![]);

        assert_eq!(dashboard.summary.total_materials, 27);
        assert_eq!(dashboard.summary.low_stock_materials, 26);
        assert_eq!(dashboard.summary.out_of_stock_materials, 1);
        assert_eq!(dashboard.summary.total_stock_value, Decimal::ZERO);
        assert_eq!(dashboard.stock_levels.len(), STOCK_LEVELS_SHOWN);
        assert_eq!(dashboard.low_stock_alerts.len(), LOW_STOCK_ALERTS_SHOWN);
        assert!(dashboard.low_stock_alerts.iter().all(|l| l.low_stock));
        assert!(dashboard.recent_activities.is_empty());
    }

    #[test]
    fn dashboard_serializes_with_camel_case_contract() {
        let dashboard = build_dashboard(
            vec![totals("M1", &[100], &[], None)],
            vec![movement(3, 0)],
            vec![],
        );
        let json = serde_json::to_value(&dashboard).unwrap();

        assert!(json["summary"]["totalStockValue"].is_number());
        assert_eq!(json["stockLevels"][0]["currentStock"], 100.0);
        assert_eq!(json["recentActivities"][0]["type"], "inflow");
        assert!(json["lowStockAlerts"].as_array().unwrap().is_empty());
    }
}
