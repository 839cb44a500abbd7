// Module declarations
pub(crate) mod projects_errors;
pub(crate) mod projects_model;
pub(crate) mod projects_repository;
pub(crate) mod projects_service;
pub(crate) mod projects_traits;

// Re-export the public interface
pub use projects_errors::ProjectError;
pub use projects_model::{NewProject, Project, ProjectDB, ProjectUpdate};
pub use projects_repository::ProjectRepository;
pub use projects_service::ProjectService;
pub use projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
