use diesel::sqlite::SqliteConnection;

use crate::donations::donations_model::{Donation, DonationDB, NewDonation};
use crate::errors::Result;
use crate::projects::Project;

/// Trait for donation repository operations. Pool-scoped reads open their own
/// connection; the write-path methods take the connection of the enclosing
/// transaction so one allocation run commits atomically.
pub trait DonationRepositoryTrait: Send + Sync {
    fn get_by_id(&self, donation_id: &str) -> Result<Donation>;
    fn list(&self) -> Result<Vec<Donation>>;
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Donation>>;
    fn insert(&self, conn: &mut SqliteConnection, row: DonationDB) -> Result<DonationDB>;
    fn load_unsatisfied(&self, conn: &mut SqliteConnection) -> Result<Vec<DonationDB>>;
    fn save_invested(&self, conn: &mut SqliteConnection, rows: &[DonationDB]) -> Result<()>;
}

/// Trait for donation service operations
pub trait DonationServiceTrait: Send + Sync {
    fn create_donation(&self, new_donation: NewDonation) -> Result<(Donation, Vec<Project>)>;
    fn get_donation(&self, donation_id: &str) -> Result<Donation>;
    fn get_donations(&self) -> Result<Vec<Donation>>;
    fn get_donations_by_user(&self, user_id: &str) -> Result<Vec<Donation>>;
}
