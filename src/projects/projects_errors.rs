use thiserror::Error;

/// Custom error type for project-related operations. These are boundary
/// rejections raised before any allocation runs.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("A project named '{0}' already exists")]
    DuplicateName(String),

    #[error("Project '{0}' is closed and can no longer be edited")]
    Closed(String),

    #[error("Cannot set the required amount of '{name}' below the {invested} already invested")]
    FullAmountBelowInvested { name: String, invested: i64 },

    #[error("Project '{0}' has received funds and cannot be deleted")]
    AlreadyInvested(String),

    #[error("Project with id {0} not found")]
    NotFound(String),
}
