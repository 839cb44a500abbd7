pub mod db;

pub mod donations;
pub mod errors;
pub mod investing;
pub mod projects;
pub mod schema;

pub use errors::{Error, Result};
