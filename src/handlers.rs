pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod pages;
pub mod projects;
pub mod users;
