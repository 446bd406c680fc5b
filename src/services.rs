pub mod auth;
pub mod dashboard_service;
pub mod inventory_service;
pub mod project_service;
pub mod rbac_service;
pub mod session;
