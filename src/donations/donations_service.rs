use chrono::Utc;
use log::debug;
use std::sync::Arc;

use crate::db::{DbPool, DbTransactionExecutor};
use crate::donations::donations_model::{Donation, DonationDB, NewDonation};
use crate::donations::donations_traits::{DonationRepositoryTrait, DonationServiceTrait};
use crate::errors::Result;
use crate::investing::{allocate, Fundable};
use crate::projects::{Project, ProjectRepositoryTrait};

/// Service for managing donations. Creating a donation triggers exactly one
/// allocation run against the unsatisfied project pool, scoped to a single
/// write transaction.
pub struct DonationService<D: DonationRepositoryTrait, P: ProjectRepositoryTrait> {
    pool: Arc<DbPool>,
    donation_repo: Arc<D>,
    project_repo: Arc<P>,
}

impl<D: DonationRepositoryTrait, P: ProjectRepositoryTrait> DonationService<D, P> {
    /// Creates a new DonationService instance
    pub fn new(pool: Arc<DbPool>, donation_repo: Arc<D>, project_repo: Arc<P>) -> Self {
        Self {
            pool,
            donation_repo,
            project_repo,
        }
    }
}

impl<D: DonationRepositoryTrait, P: ProjectRepositoryTrait> DonationServiceTrait
    for DonationService<D, P>
{
    /// Records a new donation and distributes it across open projects in
    /// arrival order. Returns the donation together with every project it
    /// funded, all persisted atomically.
    fn create_donation(&self, new_donation: NewDonation) -> Result<(Donation, Vec<Project>)> {
        new_donation.validate()?;
        debug!(
            "Creating donation of {} for user {}, drawing from the {:?} pool",
            new_donation.full_amount,
            new_donation.user_id,
            DonationDB::ROLE.counterpart()
        );

        self.pool.execute_write(|conn| {
            let mut row = self.donation_repo.insert(conn, new_donation.into())?;

            let open_projects = self.project_repo.load_unsatisfied(conn)?;
            let now = Utc::now().naive_utc();
            let funded = allocate(&mut row, open_projects, now);

            self.donation_repo
                .save_invested(conn, std::slice::from_ref(&row))?;
            self.project_repo.save_invested(conn, &funded)?;

            Ok((row.into(), funded.into_iter().map(Project::from).collect()))
        })
    }

    /// Retrieves a donation by its ID
    fn get_donation(&self, donation_id: &str) -> Result<Donation> {
        self.donation_repo.get_by_id(donation_id)
    }

    /// Lists all donations
    fn get_donations(&self) -> Result<Vec<Donation>> {
        self.donation_repo.list()
    }

    /// Lists the donations made by one user
    fn get_donations_by_user(&self, user_id: &str) -> Result<Vec<Donation>> {
        self.donation_repo.list_by_user(user_id)
    }
}
