use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::investing::{Fundable, FundingRole};
use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a charity project (a funding target)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub full_amount: i64,
    pub invested_amount: i64,
    pub fully_invested: bool,
    pub create_date: NaiveDateTime,
    pub close_date: Option<NaiveDateTime>,
}

/// Input model for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub full_amount: i64,
}

impl NewProject {
    /// Validates the new project data
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Project name cannot be empty".to_string(),
            )));
        }
        if self.description.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Project description cannot be empty".to_string(),
            )));
        }
        if self.full_amount <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Required amount must be a positive integer".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing project. All fields are optional;
/// absent fields keep their current value.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub full_amount: Option<i64>,
}

impl ProjectUpdate {
    /// Validates the project update data
    pub fn validate(&self) -> Result<()> {
        if self.name.is_none() && self.description.is_none() && self.full_amount.is_none() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name, description or fullAmount".to_string(),
            )));
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Project name cannot be empty".to_string(),
                )));
            }
        }
        if let Some(description) = &self.description {
            if description.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Project description cannot be empty".to_string(),
                )));
            }
        }
        if let Some(full_amount) = self.full_amount {
            if full_amount <= 0 {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Required amount must be a positive integer".to_string(),
                )));
            }
        }
        Ok(())
    }
}

/// Database model for projects
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
#[diesel(table_name = crate::schema::projects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProjectDB {
    pub id: String,
    pub name: String,
    pub description: String,
    pub full_amount: i64,
    pub invested_amount: i64,
    pub fully_invested: bool,
    pub create_date: NaiveDateTime,
    pub close_date: Option<NaiveDateTime>,
}

impl Fundable for ProjectDB {
    const ROLE: FundingRole = FundingRole::Project;

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
impl From<ProjectDB> for Project {
    fn from(db: ProjectDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            description: db.description,
            full_amount: db.full_amount,
            invested_amount: db.invested_amount,
            fully_invested: db.fully_invested,
            create_date: db.create_date,
            close_date: db.close_date,
        }
    }
}

impl From<NewProject> for ProjectDB {
    fn from(domain: NewProject) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            description: domain.description,
            full_amount: domain.full_amount,
            invested_amount: 0,
            fully_invested: false,
            create_date: chrono::Utc::now().naive_utc(),
            close_date: None,
        }
    }
}
