// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        auth::Session,
        rbac::{Action, Operation, Resource},
    },
    services::rbac_service::can_perform,
};

/// 1. O Trait que define qual ação uma rota exige
pub trait PermissionDef: Send + Sync + 'static {
    fn action() -> Action;
}

/// 2. O Extractor (Guardião)
/// Roda o Auth Guard (401) e depois a política (403), antes do corpo ser lido.
pub struct RequirePermission<T>(pub Session, PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // A. Sessão (revalidada aqui mesmo)
        let AuthenticatedUser(session) = AuthenticatedUser::from_request_parts(parts, state).await?;

        // B. Política pura, sem banco
        let action = T::action();
        if !can_perform(session.role, action) {
            tracing::warn!(
                user = %session.username,
                role = %session.role,
                %action,
                "Permissão negada"
            );
            return Err(AppError::Forbidden(action.to_string()));
        }

        Ok(RequirePermission(session, PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

macro_rules! permissions {
    ($($name:ident => $action:expr;)*) => {
        $(
            pub struct $name;
            impl PermissionDef for $name {
                fn action() -> Action { $action }
            }
        )*
    };
}

permissions! {
    PermCreateMaterial => Action::Inventory(Operation::Create, Resource::Material);
    PermUpdateMaterial => Action::Inventory(Operation::Update, Resource::Material);
    PermDeleteMaterial => Action::Inventory(Operation::Delete, Resource::Material);
    PermCreateProject => Action::Inventory(Operation::Create, Resource::Project);
    PermUpdateProject => Action::Inventory(Operation::Update, Resource::Project);
    PermDeleteProject => Action::Inventory(Operation::Delete, Resource::Project);
    PermCreateCategory => Action::Inventory(Operation::Create, Resource::Category);
    PermDeleteCategory => Action::Inventory(Operation::Delete, Resource::Category);
    PermCreateUnit => Action::Inventory(Operation::Create, Resource::Unit);
    PermDeleteUnit => Action::Inventory(Operation::Delete, Resource::Unit);
    PermCreateInflow => Action::Inventory(Operation::Create, Resource::Inflow);
    PermCreateOutflow => Action::Inventory(Operation::Create, Resource::Outflow);
    PermManageUsers => Action::ManageUsers;
}
