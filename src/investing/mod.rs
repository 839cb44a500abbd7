pub mod investing_engine;
pub mod investing_model;

pub use investing_engine::{allocate, settle};
pub use investing_model::{Fundable, FundingRole};
