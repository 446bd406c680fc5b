// src/services/inventory_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::inventory::{
        Category, CreateCategoryPayload, CreateUnitPayload, LedgerEntry, LedgerEntryPayload,
        Material, MaterialPayload, MaterialWithUnit, MovementDirection, Unit,
    },
};

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    pool: PgPool,
}

impl InventoryService {
    pub fn new(inventory_repo: InventoryRepository, pool: PgPool) -> Self {
        Self { inventory_repo, pool }
    }

    // --- CATEGORIAS ---
    pub async fn get_all_categories(&self) -> Result<Vec<Category>, AppError> {
        self.inventory_repo.get_all_categories().await
    }

    pub async fn create_category(&self, payload: &CreateCategoryPayload) -> Result<Category, AppError> {
        self.inventory_repo
            .create_category(&self.pool, payload.name.trim(), payload.description.as_deref())
            .await
    }

    pub async fn delete_category(&self, id: Uuid) -> Result<(), AppError> {
        if !self.inventory_repo.delete_category(&self.pool, id).await? {
            return Err(AppError::NotFound("Categoria"));
        }
        Ok(())
    }

    // --- UNIDADES ---
    pub async fn get_all_units(&self) -> Result<Vec<Unit>, AppError> {
        self.inventory_repo.get_all_units().await
    }

    pub async fn create_unit(&self, payload: &CreateUnitPayload) -> Result<Unit, AppError> {
        self.inventory_repo
            .create_unit(&self.pool, payload.name.trim(), payload.symbol.trim())
            .await
    }

    pub async fn delete_unit(&self, id: Uuid) -> Result<(), AppError> {
        if !self.inventory_repo.delete_unit(&self.pool, id).await? {
            return Err(AppError::NotFound("Unidade"));
        }
        Ok(())
    }

    // --- MATERIAIS ---
    pub async fn get_active_materials(&self) -> Result<Vec<Material>, AppError> {
        self.inventory_repo.get_active_materials().await
    }

    pub async fn get_materials_with_units(&self) -> Result<Vec<MaterialWithUnit>, AppError> {
        self.inventory_repo.get_materials_with_units().await
    }

    pub async fn create_material(&self, payload: &MaterialPayload) -> Result<Material, AppError> {
        self.inventory_repo
            .create_material(
                &self.pool,
                payload.name.trim(),
                payload.category_id,
                payload.unit_id,
                payload.min_stock_level,
            )
            .await
    }

    pub async fn update_material(&self, id: Uuid, payload: &MaterialPayload) -> Result<Material, AppError> {
        self.inventory_repo
            .update_material(
                &self.pool,
                id,
                payload.name.trim(),
                payload.category_id,
                payload.unit_id,
                payload.min_stock_level,
            )
            .await?
            .ok_or(AppError::NotFound("Material"))
    }

    pub async fn deactivate_material(&self, id: Uuid) -> Result<(), AppError> {
        if !self.inventory_repo.deactivate_material(&self.pool, id).await? {
            return Err(AppError::NotFound("Material"));
        }
        Ok(())
    }

    // --- LIVRO-RAZÃO ---
    pub async fn get_ledger(&self, direction: MovementDirection) -> Result<Vec<LedgerEntry>, AppError> {
        self.inventory_repo.get_ledger(direction).await
    }

    /// Registra entrada ou saída. Saldo nunca é atualizado aqui: ele é sempre
    /// derivado do livro-razão na leitura.
    pub async fn record_movement(
        &self,
        direction: MovementDirection,
        payload: &LedgerEntryPayload,
    ) -> Result<LedgerEntry, AppError> {
        let mut tx = self.pool.begin().await?;

        if !self
            .inventory_repo
            .material_is_active(&mut *tx, payload.material_id)
            .await?
        {
            return Err(AppError::BusinessRule(
                "Material inexistente ou desativado.".into(),
            ));
        }

        let entry = self
            .inventory_repo
            .record_movement(
                &mut *tx,
                direction,
                payload.material_id,
                payload.quantity,
                payload.unit_id,
                payload.project_id,
                payload.date,
                payload.person.trim(),
                payload.notes.as_deref(),
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            entry_id = %entry.id,
            material_id = %entry.material_id,
            quantity = %entry.quantity,
            direction = ?direction,
            "Movimentação registrada"
        );
        Ok(entry)
    }
}
