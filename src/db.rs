pub mod user_repo;
pub use user_repo::UserRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod project_repo;
pub use project_repo::ProjectRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
