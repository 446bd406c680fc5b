// src/db/inventory_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;
use crate::{
    common::{
        db_utils::{foreign_key_violation_as, ledger_write_error, unique_violation_as},
        error::AppError,
    },
    models::inventory::{
        Category, LedgerEntry, Material, MaterialWithUnit, MovementDirection, Unit,
    },
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---
    // Funções de leitura são simples e usam a pool principal.

    pub async fn get_all_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    pub async fn get_all_units(&self) -> Result<Vec<Unit>, AppError> {
        let units = sqlx::query_as::<_, Unit>("SELECT * FROM units ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(units)
    }

    pub async fn get_active_materials(&self) -> Result<Vec<Material>, AppError> {
        let materials = sqlx::query_as::<_, Material>(
            "SELECT * FROM materials WHERE is_active ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(materials)
    }

    pub async fn get_materials_with_units(&self) -> Result<Vec<MaterialWithUnit>, AppError> {
        let materials = sqlx::query_as::<_, MaterialWithUnit>(
            r#"
            SELECT
                m.id, m.name, m.category_id, m.min_stock_level,
                u.id AS unit_id, u.name AS unit_name, u.symbol AS unit_symbol
            FROM materials m
            JOIN units u ON u.id = m.unit_id
            WHERE m.is_active
            ORDER BY m.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(materials)
    }

    pub async fn get_ledger(&self, direction: MovementDirection) -> Result<Vec<LedgerEntry>, AppError> {
        // O nome da tabela vem de um enum fechado, nunca da requisição.
        let sql = format!(
            r#"
            SELECT
                l.id, l.material_id, m.name AS material_name, l.quantity, l.unit_id,
                l.project_id, l.date, l.person, l.notes, l.created_at
            FROM {} l
            JOIN materials m ON m.id = l.material_id
            ORDER BY l.date DESC, l.created_at DESC
            "#,
            direction.table()
        );
        let entries = sqlx::query_as::<_, LedgerEntry>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(entries)
    }

    // ---
    // Funções de "Escrita"
    // ---
    // Estas usam o padrão genérico 'Executor' para rodar dentro de uma transação.

    pub async fn create_unit<'e, E>(
        &self,
        executor: E,
        name: &str,
        symbol: &str,
    ) -> Result<Unit, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Unit>(
            "INSERT INTO units (name, symbol) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(symbol)
        .fetch_one(executor)
        .await
        .map_err(|e| unique_violation_as(e, format!("A unidade '{}' já existe.", name)))
    }

    /// Remove a unidade. Falha com 400 se algum material ou movimentação ainda a usa.
    pub async fn delete_unit<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM units WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| foreign_key_violation_as(e, "A unidade está em uso e não pode ser removida."))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn create_category<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(description)
        .fetch_one(executor)
        .await
        .map_err(|e| unique_violation_as(e, format!("A categoria '{}' já existe.", name)))
    }

    pub async fn delete_category<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| foreign_key_violation_as(e, "A categoria está em uso e não pode ser removida."))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn create_material<'e, E>(
        &self,
        executor: E,
        name: &str,
        category_id: Uuid,
        unit_id: Uuid,
        min_stock_level: Option<Decimal>,
    ) -> Result<Material, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Material>(
            r#"
            INSERT INTO materials (name, category_id, unit_id, min_stock_level)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(category_id)
        .bind(unit_id)
        .bind(min_stock_level)
        .fetch_one(executor)
        .await
        .map_err(|e| match e {
            e @ sqlx::Error::Database(_) if is_foreign_key(&e) => {
                AppError::BusinessRule("Categoria ou unidade inexistente.".into())
            }
            e => unique_violation_as(e, format!("O material '{}' já existe.", name)),
        })
    }

    pub async fn update_material<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        category_id: Uuid,
        unit_id: Uuid,
        min_stock_level: Option<Decimal>,
    ) -> Result<Option<Material>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Material>(
            r#"
            UPDATE materials
            SET name = $2, category_id = $3, unit_id = $4, min_stock_level = $5, updated_at = NOW()
            WHERE id = $1 AND is_active
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(category_id)
        .bind(unit_id)
        .bind(min_stock_level)
        .fetch_optional(executor)
        .await
        .map_err(|e| match e {
            e @ sqlx::Error::Database(_) if is_foreign_key(&e) => {
                AppError::BusinessRule("Categoria ou unidade inexistente.".into())
            }
            e => unique_violation_as(e, format!("O material '{}' já existe.", name)),
        })
    }

    /// Desativa o material. As movimentações continuam apontando para ele.
    pub async fn deactivate_material<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE materials SET is_active = FALSE, updated_at = NOW() WHERE id = $1 AND is_active",
        )
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn material_is_active<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM materials WHERE id = $1 AND is_active)",
        )
        .bind(id)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    /// Registra uma movimentação no livro-razão. Não existe UPDATE nem DELETE aqui.
    pub async fn record_movement<'e, E>(
        &self,
        executor: E,
        direction: MovementDirection,
        material_id: Uuid,
        quantity: Decimal,
        unit_id: Uuid,
        project_id: Option<Uuid>,
        date: NaiveDate,
        person: &str,
        notes: Option<&str>,
    ) -> Result<LedgerEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            WITH inserted AS (
                INSERT INTO {} (material_id, quantity, unit_id, project_id, date, person, notes)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
            )
            SELECT
                i.id, i.material_id, m.name AS material_name, i.quantity, i.unit_id,
                i.project_id, i.date, i.person, i.notes, i.created_at
            FROM inserted i
            JOIN materials m ON m.id = i.material_id
            "#,
            direction.table()
        );

        sqlx::query_as::<_, LedgerEntry>(&sql)
            .bind(material_id)
            .bind(quantity)
            .bind(unit_id)
            .bind(project_id)
            .bind(date)
            .bind(person)
            .bind(notes)
            .fetch_one(executor)
            .await
            .map_err(|e| ledger_write_error(e, "Material, unidade ou projeto inexistente."))
    }
}

fn is_foreign_key(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}
