// src/services/project_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{project_repo::duplicate_message, ProjectRepository},
    models::project::{Project, ProjectPayload},
};

#[derive(Clone)]
pub struct ProjectService {
    repo: ProjectRepository,
}

impl ProjectService {
    pub fn new(repo: ProjectRepository) -> Self {
        Self { repo }
    }

    pub async fn list_active(&self) -> Result<Vec<Project>, AppError> {
        self.repo.list_active().await
    }

    /// Cria o projeto recusando nome duplicado (sem diferenciar maiúsculas).
    /// O pré-check só dá uma resposta rápida; quem garante é o índice único.
    pub async fn create_project(&self, payload: &ProjectPayload) -> Result<Project, AppError> {
        let name = payload.trimmed_name();
        let mut tx = self.repo.pool().begin().await?;

        if self.repo.active_name_exists(&mut *tx, name, None).await? {
            return Err(AppError::BusinessRule(duplicate_message(name)));
        }

        let project = self
            .repo
            .create(&mut *tx, name, payload.description.as_deref())
            .await?;

        tx.commit().await?;

        tracing::info!(project_id = %project.id, name = %project.name, "Projeto criado");
        Ok(project)
    }

    pub async fn update_project(&self, id: Uuid, payload: &ProjectPayload) -> Result<Project, AppError> {
        let name = payload.trimmed_name();
        let mut tx = self.repo.pool().begin().await?;

        if self.repo.active_name_exists(&mut *tx, name, Some(id)).await? {
            return Err(AppError::BusinessRule(duplicate_message(name)));
        }

        let project = self
            .repo
            .update(&mut *tx, id, name, payload.description.as_deref())
            .await?
            .ok_or(AppError::NotFound("Projeto"))?;

        tx.commit().await?;
        Ok(project)
    }

    pub async fn deactivate_project(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.deactivate(self.repo.pool(), id).await? {
            return Err(AppError::NotFound("Projeto"));
        }
        tracing::info!(project_id = %id, "Projeto desativado");
        Ok(())
    }
}
