// Module declarations
pub(crate) mod donations_errors;
pub(crate) mod donations_model;
pub(crate) mod donations_repository;
pub(crate) mod donations_service;
pub(crate) mod donations_traits;

// Re-export the public interface
pub use donations_errors::DonationError;
pub use donations_model::{Donation, DonationDB, NewDonation};
pub use donations_repository::DonationRepository;
pub use donations_service::DonationService;
pub use donations_traits::{DonationRepositoryTrait, DonationServiceTrait};
