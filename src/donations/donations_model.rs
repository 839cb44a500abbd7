use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::investing::{Fundable, FundingRole};
use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a donation (a funding source). Donations are
/// immutable once created; only the allocation engine advances their
/// invested amount.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: String,
    pub user_id: String,
    pub comment: Option<String>,
    pub full_amount: i64,
    pub invested_amount: i64,
    pub fully_invested: bool,
    pub create_date: NaiveDateTime,
    pub close_date: Option<NaiveDateTime>,
}

/// Input model for creating a new donation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDonation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub comment: Option<String>,
    pub full_amount: i64,
}

impl NewDonation {
    /// Validates the new donation data
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.full_amount <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Donation amount must be a positive integer".to_string(),
            )));
        }
        Ok(())
    }
}

/// Database model for donations
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::donations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DonationDB {
    pub id: String,
    pub user_id: String,
    pub comment: Option<String>,
    pub full_amount: i64,
    pub invested_amount: i64,
    pub fully_invested: bool,
    pub create_date: NaiveDateTime,
    pub close_date: Option<NaiveDateTime>,
}

impl Fundable for DonationDB {
    const ROLE: FundingRole = FundingRole::Donation;

    fn full_amount(&self) -> i64 {
        self.full_amount
    }

    fn invested_amount(&self) -> i64 {
        self.invested_amount
    }

    fn set_invested_amount(&mut self, amount: i64) {
        self.invested_amount = amount;
    }

    fn fully_invested(&self) -> bool {
        self.fully_invested
    }

    fn set_fully_invested(&mut self, value: bool) {
        self.fully_invested = value;
    }

    fn close_date(&self) -> Option<NaiveDateTime> {
        self.close_date
    }

    fn set_close_date(&mut self, date: Option<NaiveDateTime>) {
        self.close_date = date;
    }

    fn create_date(&self) -> NaiveDateTime {
        self.create_date
    }
}

// Conversion implementations
impl From<DonationDB> for Donation {
    fn from(db: DonationDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            comment: db.comment,
            full_amount: db.full_amount,
            invested_amount: db.invested_amount,
            fully_invested: db.fully_invested,
            create_date: db.create_date,
            close_date: db.close_date,
        }
    }
}

impl From<NewDonation> for DonationDB {
    fn from(domain: NewDonation) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            user_id: domain.user_id,
            comment: domain.comment,
            full_amount: domain.full_amount,
            invested_amount: 0,
            fully_invested: false,
            create_date: chrono::Utc::now().naive_utc(),
            close_date: None,
        }
    }
}
