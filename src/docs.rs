// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::sign_in,
        handlers::auth::get_session,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,

        // --- Materiais ---
        handlers::inventory::get_materials_with_units,

        // --- Projetos ---
        handlers::projects::list_projects,
        handlers::projects::create_project,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Session,
            models::auth::SignInPayload,
            models::auth::AuthResponse,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::StockLevel,
            models::dashboard::RecentActivity,
            models::dashboard::DashboardResponse,

            // --- Inventário ---
            models::inventory::MaterialWithUnit,
            models::inventory::MovementDirection,

            // --- Projetos ---
            models::project::Project,
            models::project::ProjectPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Login e sessão"),
        (name = "Dashboard", description = "Saldos e atividades do almoxarifado"),
        (name = "Materiais", description = "Catálogo de materiais"),
        (name = "Projetos", description = "Projetos (obras) que recebem saídas")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
