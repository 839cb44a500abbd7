use thiserror::Error;

/// Custom error type for donation-related operations
#[derive(Debug, Error)]
pub enum DonationError {
    #[error("Donation with id {0} not found")]
    NotFound(String),
}
