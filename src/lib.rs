// src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::{config::AppState, docs::ApiDoc, middleware::gate::route_gate};

/// Monta o router completo. O gate é a última camada, então vale também
/// para o fallback: rota desconhecida sem sessão vai para o login.
pub fn build_router(app_state: AppState) -> Router {
    // Páginas públicas
    let public_pages = Router::new()
        .route("/", get(handlers::pages::home))
        .route(
            "/auth/signin",
            get(handlers::pages::signin_page).post(handlers::pages::signin_submit),
        )
        .route("/auth/error", get(handlers::pages::error_page));

    // Páginas protegidas
    let protected_pages = Router::new()
        .route("/dashboard", get(handlers::pages::dashboard_page))
        .route("/dashboard/users", get(handlers::pages::users_page));

    let auth_routes = Router::new()
        .route("/signin", post(handlers::auth::sign_in))
        .route("/signout", post(handlers::auth::sign_out))
        .route("/session", get(handlers::auth::get_session));

    let user_routes = Router::new()
        .route(
            "/",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route("/me", get(handlers::auth::get_me));

    let material_routes = Router::new()
        .route(
            "/",
            get(handlers::inventory::get_all_materials).post(handlers::inventory::create_material),
        )
        .route("/with-units", get(handlers::inventory::get_materials_with_units))
        .route(
            "/{id}",
            put(handlers::inventory::update_material).delete(handlers::inventory::delete_material),
        );

    let category_routes = Router::new()
        .route(
            "/",
            get(handlers::inventory::get_all_categories).post(handlers::inventory::create_category),
        )
        .route("/{id}", delete(handlers::inventory::delete_category));

    let unit_routes = Router::new()
        .route(
            "/",
            get(handlers::inventory::get_all_units).post(handlers::inventory::create_unit),
        )
        .route("/{id}", delete(handlers::inventory::delete_unit));

    let project_routes = Router::new()
        .route(
            "/",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route(
            "/{id}",
            put(handlers::projects::update_project).delete(handlers::projects::delete_project),
        );

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/materials", material_routes)
        .nest("/categories", category_routes)
        .nest("/units", unit_routes)
        .nest("/projects", project_routes)
        .route("/inventory/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/inventory/stock-levels", get(handlers::dashboard::get_stock_levels))
        .route(
            "/inflows",
            get(handlers::inventory::get_inflows).post(handlers::inventory::create_inflow),
        )
        .route(
            "/outflows",
            get(handlers::inventory::get_outflows).post(handlers::inventory::create_outflow),
        );

    Router::new()
        .merge(public_pages)
        .merge(protected_pages)
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(handlers::pages::not_found)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            route_gate,
        ))
        .with_state(app_state)
}
