// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::validators::{validate_not_blank, validate_not_negative, validate_positive};

// --- 1. Unidades de Medida ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: Uuid,
    pub name: String,
    pub symbol: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUnitPayload {
    #[validate(
        length(min = 1, max = 50, message = "O nome é obrigatório."),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[validate(
        length(min = 1, max = 10, message = "O símbolo é obrigatório."),
        custom(function = "validate_not_blank")
    )]
    pub symbol: String,
}

// --- 2. Categorias ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryPayload {
    #[validate(
        length(min = 1, max = 100, message = "O nome é obrigatório."),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    pub description: Option<String>,
}

// --- 3. Materiais ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub unit_id: Uuid,
    pub min_stock_level: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Material com a sua unidade de medida (GET /api/materials/with-units).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialWithUnit {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub min_stock_level: Option<Decimal>,
    pub unit_id: Uuid,
    pub unit_name: String,
    pub unit_symbol: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MaterialPayload {
    #[validate(
        length(min = 1, max = 150, message = "O nome é obrigatório."),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    pub category_id: Uuid,
    pub unit_id: Uuid,
    #[validate(custom(function = "validate_not_negative"))]
    pub min_stock_level: Option<Decimal>,
}

// --- 4. Livro-razão (Entradas / Saídas) ---
// Registros imutáveis: só existe INSERT.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MovementDirection {
    Inflow,
    Outflow,
}

impl MovementDirection {
    pub fn table(&self) -> &'static str {
        match self {
            MovementDirection::Inflow => "inflows",
            MovementDirection::Outflow => "outflows",
        }
    }

    /// Rótulo exibido nas páginas.
    pub fn label(&self) -> &'static str {
        match self {
            MovementDirection::Inflow => "Entrada",
            MovementDirection::Outflow => "Saída",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: Uuid,
    pub material_id: Uuid,
    pub material_name: String,
    pub quantity: Decimal,
    pub unit_id: Uuid,
    pub project_id: Option<Uuid>,
    pub date: NaiveDate,
    pub person: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryPayload {
    pub material_id: Uuid,
    #[validate(custom(function = "validate_positive"))]
    pub quantity: Decimal,
    pub unit_id: Uuid,
    pub project_id: Option<Uuid>,
    pub date: NaiveDate,
    #[validate(
        length(min = 1, max = 100, message = "O responsável é obrigatório."),
        custom(function = "validate_not_blank")
    )]
    pub person: String,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ledger_payload(quantity: serde_json::Value) -> LedgerEntryPayload {
        serde_json::from_value(json!({
            "materialId": Uuid::new_v4(),
            "quantity": quantity,
            "unitId": Uuid::new_v4(),
            "date": "2025-03-10",
            "person": "Joana",
        }))
        .unwrap()
    }

    #[test]
    fn ledger_quantity_must_be_positive() {
        assert!(ledger_payload(json!(12.5)).validate().is_ok());

        let errors = ledger_payload(json!(0)).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("quantity"));
        assert!(ledger_payload(json!(-3)).validate().is_err());
    }

    #[test]
    fn material_min_stock_may_be_absent_but_not_negative() {
        let mut payload = MaterialPayload {
            name: "Cimento CP-II".into(),
            category_id: Uuid::new_v4(),
            unit_id: Uuid::new_v4(),
            min_stock_level: None,
        };
        assert!(payload.validate().is_ok());

        payload.min_stock_level = Some(Decimal::from(-1));
        assert!(payload.validate().is_err());

        // 1.2345 seria gravado como 1.235
        payload.min_stock_level = Some(Decimal::new(12345, 4));
        assert!(payload.validate().is_err());
    }

    #[test]
    fn ledger_quantity_must_fit_the_column() {
        let with_quantity = |quantity: Decimal| {
            let mut entry = ledger_payload(json!(1));
            entry.quantity = quantity;
            entry
        };

        // 0.0004 viraria 0.000 no banco
        assert!(with_quantity(Decimal::new(4, 4)).validate().is_err());
        assert!(with_quantity(Decimal::new(12345, 4)).validate().is_err());
        assert!(with_quantity(Decimal::from(999_999_999_999_i64)).validate().is_err());
        assert!(with_quantity(Decimal::new(1235, 3)).validate().is_ok());
    }

    #[test]
    fn whitespace_only_text_fields_are_rejected() {
        let material = MaterialPayload {
            name: "   ".into(),
            category_id: Uuid::new_v4(),
            unit_id: Uuid::new_v4(),
            min_stock_level: None,
        };
        assert!(material.validate().unwrap_err().field_errors().contains_key("name"));

        let unit = CreateUnitPayload { name: "Saco".into(), symbol: "  ".into() };
        assert!(unit.validate().unwrap_err().field_errors().contains_key("symbol"));

        let category = CreateCategoryPayload { name: " ".into(), description: None };
        assert!(category.validate().is_err());

        let mut entry = ledger_payload(json!(1));
        entry.person = "   ".into();
        assert!(entry.validate().unwrap_err().field_errors().contains_key("person"));
    }

    #[test]
    fn direction_serializes_as_lowercase_tag() {
        assert_eq!(serde_json::to_value(MovementDirection::Inflow).unwrap(), "inflow");
        assert_eq!(serde_json::to_value(MovementDirection::Outflow).unwrap(), "outflow");
    }
}
