use diesel::sqlite::SqliteConnection;

use crate::donations::Donation;
use crate::errors::Result;
use crate::projects::projects_model::{NewProject, Project, ProjectDB, ProjectUpdate};

/// Trait for project repository operations. Pool-scoped reads open their own
/// connection; the write-path methods take the connection of the enclosing
/// transaction so one allocation run commits atomically.
pub trait ProjectRepositoryTrait: Send + Sync {
    fn get_by_id(&self, project_id: &str) -> Result<Project>;
    fn get_by_name(&self, project_name: &str) -> Result<Option<Project>>;
    fn list(&self) -> Result<Vec<Project>>;
    fn list_closed_by_duration(&self) -> Result<Vec<Project>>;
    fn load_for_update(&self, conn: &mut SqliteConnection, project_id: &str) -> Result<ProjectDB>;
    fn insert(&self, conn: &mut SqliteConnection, row: ProjectDB) -> Result<ProjectDB>;
    fn update(&self, conn: &mut SqliteConnection, row: ProjectDB) -> Result<ProjectDB>;
    fn delete(&self, conn: &mut SqliteConnection, project_id: &str) -> Result<usize>;
    fn load_unsatisfied(&self, conn: &mut SqliteConnection) -> Result<Vec<ProjectDB>>;
    fn save_invested(&self, conn: &mut SqliteConnection, rows: &[ProjectDB]) -> Result<()>;
}

/// Trait for project service operations
pub trait ProjectServiceTrait: Send + Sync {
    fn create_project(&self, new_project: NewProject) -> Result<(Project, Vec<Donation>)>;
    fn update_project(&self, project_id: &str, update: ProjectUpdate)
        -> Result<(Project, Vec<Donation>)>;
    fn delete_project(&self, project_id: &str) -> Result<()>;
    fn get_project(&self, project_id: &str) -> Result<Project>;
    fn get_projects(&self) -> Result<Vec<Project>>;
    fn get_closed_projects_by_duration(&self) -> Result<Vec<Project>>;
}
