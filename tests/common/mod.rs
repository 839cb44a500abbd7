use std::sync::Arc;

use fundflow_core::db::{self, DbPool};
use fundflow_core::donations::{DonationRepository, DonationService};
use fundflow_core::projects::{ProjectRepository, ProjectService};
use tempfile::TempDir;

pub type Projects = ProjectService<ProjectRepository, DonationRepository>;
pub type Donations = DonationService<DonationRepository, ProjectRepository>;

/// Builds a throwaway SQLite database in a temp directory. The TempDir must
/// stay alive for the duration of the test.
pub fn setup_pool() -> (TempDir, Arc<DbPool>) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");

    let db_path = db::init(dir.path().to_str().unwrap()).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");

    (dir, pool)
}

pub fn build_services(pool: Arc<DbPool>) -> (Projects, Donations) {
    let project_repo = Arc::new(ProjectRepository::new(pool.clone()));
    let donation_repo = Arc::new(DonationRepository::new(pool.clone()));

    let project_service =
        ProjectService::new(pool.clone(), project_repo.clone(), donation_repo.clone());
    let donation_service = DonationService::new(pool, donation_repo, project_repo);

    (project_service, donation_service)
}
