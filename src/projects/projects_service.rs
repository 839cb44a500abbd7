use chrono::Utc;
use log::debug;
use std::sync::Arc;

use crate::db::{DbPool, DbTransactionExecutor};
use crate::donations::{Donation, DonationRepositoryTrait};
use crate::errors::Result;
use crate::investing::{allocate, settle, Fundable};
use crate::projects::projects_errors::ProjectError;
use crate::projects::projects_model::{NewProject, Project, ProjectDB, ProjectUpdate};
use crate::projects::projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};

/// Service for managing charity projects. Creating or reopening a project
/// triggers exactly one allocation run against the unsatisfied donation pool,
/// scoped to a single write transaction. All boundary rejections (duplicate
/// names, closed-project edits, under-funding edits, non-empty deletes) are
/// raised here, before any allocation runs.
pub struct ProjectService<P: ProjectRepositoryTrait, D: DonationRepositoryTrait> {
    pool: Arc<DbPool>,
    project_repo: Arc<P>,
    donation_repo: Arc<D>,
}

impl<P: ProjectRepositoryTrait, D: DonationRepositoryTrait> ProjectService<P, D> {
    /// Creates a new ProjectService instance
    pub fn new(pool: Arc<DbPool>, project_repo: Arc<P>, donation_repo: Arc<D>) -> Self {
        Self {
            pool,
            project_repo,
            donation_repo,
        }
    }

    /// Rejects a name already carried by another project
    fn check_name_available(&self, project_name: &str, own_id: Option<&str>) -> Result<()> {
        if let Some(existing) = self.project_repo.get_by_name(project_name)? {
            if own_id != Some(existing.id.as_str()) {
                return Err(ProjectError::DuplicateName(project_name.to_string()).into());
            }
        }
        Ok(())
    }
}

impl<P: ProjectRepositoryTrait, D: DonationRepositoryTrait> ProjectServiceTrait
    for ProjectService<P, D>
{
    /// Creates a new project and immediately funds it from waiting donations
    /// in arrival order. Returns the project together with every donation
    /// that contributed, all persisted atomically.
    fn create_project(&self, new_project: NewProject) -> Result<(Project, Vec<Donation>)> {
        new_project.validate()?;
        self.check_name_available(&new_project.name, None)?;
        debug!(
            "Creating project '{}' with required amount {}, drawing from the {:?} pool",
            new_project.name,
            new_project.full_amount,
            ProjectDB::ROLE.counterpart()
        );

        self.pool.execute_write(|conn| {
            let mut row = self.project_repo.insert(conn, new_project.into())?;

            let waiting_donations = self.donation_repo.load_unsatisfied(conn)?;
            let now = Utc::now().naive_utc();
            let contributors = allocate(&mut row, waiting_donations, now);

            self.project_repo
                .save_invested(conn, std::slice::from_ref(&row))?;
            self.donation_repo.save_invested(conn, &contributors)?;

            Ok((
                row.into(),
                contributors.into_iter().map(Donation::from).collect(),
            ))
        })
    }

    /// Applies a validated update to an open project. Raising the required
    /// amount reopens capacity, so the update re-runs the allocation;
    /// lowering it to exactly the invested amount closes the project.
    fn update_project(
        &self,
        project_id: &str,
        update: ProjectUpdate,
    ) -> Result<(Project, Vec<Donation>)> {
        update.validate()?;

        let existing = self.project_repo.get_by_id(project_id)?;
        if existing.fully_invested {
            return Err(ProjectError::Closed(existing.name).into());
        }
        if let Some(new_name) = &update.name {
            self.check_name_available(new_name, Some(project_id))?;
        }
        if let Some(new_full_amount) = update.full_amount {
            if new_full_amount < existing.invested_amount {
                return Err(ProjectError::FullAmountBelowInvested {
                    name: existing.name,
                    invested: existing.invested_amount,
                }
                .into());
            }
        }

        self.pool.execute_write(|conn| {
            // Re-read under the write lock; another allocation run may have
            // advanced this project between validation and here.
            let fresh = self.project_repo.load_for_update(conn, project_id)?;
            if fresh.fully_invested {
                return Err(ProjectError::Closed(fresh.name).into());
            }
            if let Some(new_full_amount) = update.full_amount {
                if new_full_amount < fresh.invested_amount {
                    return Err(ProjectError::FullAmountBelowInvested {
                        name: fresh.name,
                        invested: fresh.invested_amount,
                    }
                    .into());
                }
            }

            let row = ProjectDB {
                name: update.name.clone().unwrap_or(fresh.name),
                description: update.description.clone().unwrap_or(fresh.description),
                full_amount: update.full_amount.unwrap_or(fresh.full_amount),
                ..fresh
            };
            let mut row = self.project_repo.update(conn, row)?;

            let now = Utc::now().naive_utc();
            settle(&mut row, now);

            let waiting_donations = self.donation_repo.load_unsatisfied(conn)?;
            let contributors = allocate(&mut row, waiting_donations, now);

            self.project_repo
                .save_invested(conn, std::slice::from_ref(&row))?;
            self.donation_repo.save_invested(conn, &contributors)?;

            Ok((
                row.into(),
                contributors.into_iter().map(Donation::from).collect(),
            ))
        })
    }

    /// Deletes a project that has not received any funds yet
    fn delete_project(&self, project_id: &str) -> Result<()> {
        let existing = self.project_repo.get_by_id(project_id)?;
        if existing.invested_amount > 0 {
            return Err(ProjectError::AlreadyInvested(existing.name).into());
        }
        debug!("Deleting project '{}'", existing.name);

        self.pool.execute_write(|conn| {
            let fresh = self.project_repo.load_for_update(conn, project_id)?;
            if fresh.invested_amount > 0 {
                return Err(ProjectError::AlreadyInvested(fresh.name).into());
            }
            self.project_repo.delete(conn, project_id)?;
            Ok(())
        })
    }

    /// Retrieves a project by its ID
    fn get_project(&self, project_id: &str) -> Result<Project> {
        self.project_repo.get_by_id(project_id)
    }

    /// Lists all projects
    fn get_projects(&self) -> Result<Vec<Project>> {
        self.project_repo.list()
    }

    /// Lists fully invested projects ordered by how quickly they were funded
    fn get_closed_projects_by_duration(&self) -> Result<Vec<Project>> {
        self.project_repo.list_closed_by_duration()
    }
}
