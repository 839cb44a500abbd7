use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::donations::donations_errors::DonationError;
use crate::errors::Result;
use crate::schema::donations;
use crate::schema::donations::dsl::*;

use super::donations_model::{Donation, DonationDB};

/// Repository for managing donation data in the database
pub struct DonationRepository {
    pool: Arc<DbPool>,
}

impl DonationRepository {
    /// Creates a new DonationRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl super::donations_traits::DonationRepositoryTrait for DonationRepository {
    /// Retrieves a donation by its ID
    fn get_by_id(&self, donation_id: &str) -> Result<Donation> {
        let mut conn = get_connection(&self.pool)?;

        let donation = donations
            .find(donation_id)
            .first::<DonationDB>(&mut conn)
            .optional()?
            .ok_or_else(|| DonationError::NotFound(donation_id.to_string()))?;

        Ok(donation.into())
    }

    /// Lists all donations, oldest first
    fn list(&self) -> Result<Vec<Donation>> {
        let mut conn = get_connection(&self.pool)?;

        let results = donations
            .order(create_date.asc())
            .load::<DonationDB>(&mut conn)?;

        Ok(results.into_iter().map(Donation::from).collect())
    }

    /// Lists the donations made by one user, oldest first
    fn list_by_user(&self, donation_user_id: &str) -> Result<Vec<Donation>> {
        let mut conn = get_connection(&self.pool)?;

        let results = donations
            .filter(user_id.eq(donation_user_id))
            .order(create_date.asc())
            .load::<DonationDB>(&mut conn)?;

        Ok(results.into_iter().map(Donation::from).collect())
    }

    /// Inserts a new donation row inside the caller's transaction
    fn insert(&self, conn: &mut SqliteConnection, mut row: DonationDB) -> Result<DonationDB> {
        if row.id.is_empty() {
            row.id = uuid::Uuid::new_v4().to_string();
        }

        Ok(diesel::insert_into(donations::table)
            .values(&row)
            .returning(donations::all_columns)
            .get_result(conn)?)
    }

    /// Loads every donation with remaining capacity, ordered by arrival.
    /// The uuid id is the stable tie-break for equal create dates.
    fn load_unsatisfied(&self, conn: &mut SqliteConnection) -> Result<Vec<DonationDB>> {
        Ok(donations
            .filter(fully_invested.eq(false))
            .order((create_date.asc(), id.asc()))
            .load::<DonationDB>(conn)?)
    }

    /// Writes back the allocation-owned columns of every mutated row inside
    /// the caller's transaction
    fn save_invested(&self, conn: &mut SqliteConnection, rows: &[DonationDB]) -> Result<()> {
        for row in rows {
            diesel::update(donations.find(&row.id))
                .set((
                    invested_amount.eq(row.invested_amount),
                    fully_invested.eq(row.fully_invested),
                    close_date.eq(row.close_date),
                ))
                .execute(conn)?;
        }

        Ok(())
    }
}
