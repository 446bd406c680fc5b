pub mod auth;
pub mod gate;
pub mod rbac;
pub mod validation;
