pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod project;
pub mod rbac;
pub mod validators;
