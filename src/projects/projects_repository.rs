use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::projects::projects_errors::ProjectError;
use crate::schema::projects;
use crate::schema::projects::dsl::*;

use super::projects_model::{Project, ProjectDB};

/// Repository for managing project data in the database
pub struct ProjectRepository {
    pool: Arc<DbPool>,
}

impl ProjectRepository {
    /// Creates a new ProjectRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl super::projects_traits::ProjectRepositoryTrait for ProjectRepository {
    /// Retrieves a project by its ID
    fn get_by_id(&self, project_id: &str) -> Result<Project> {
        let mut conn = get_connection(&self.pool)?;

        let project = projects
            .find(project_id)
            .first::<ProjectDB>(&mut conn)
            .optional()?
            .ok_or_else(|| ProjectError::NotFound(project_id.to_string()))?;

        Ok(project.into())
    }

    /// Retrieves a project by its unique name, if one exists
    fn get_by_name(&self, project_name: &str) -> Result<Option<Project>> {
        let mut conn = get_connection(&self.pool)?;

        let project = projects
            .filter(name.eq(project_name))
            .first::<ProjectDB>(&mut conn)
            .optional()?;

        Ok(project.map(Project::from))
    }

    /// Lists all projects, oldest first
    fn list(&self) -> Result<Vec<Project>> {
        let mut conn = get_connection(&self.pool)?;

        let results = projects
            .order(create_date.asc())
            .load::<ProjectDB>(&mut conn)?;

        Ok(results.into_iter().map(Project::from).collect())
    }

    /// Lists fully invested projects ordered by how long they took to fund,
    /// fastest first
    fn list_closed_by_duration(&self) -> Result<Vec<Project>> {
        use diesel::dsl::sql;
        use diesel::sql_types::Double;

        let mut conn = get_connection(&self.pool)?;

        let results = projects
            .filter(fully_invested.eq(true))
            .order(sql::<Double>(
                "julianday(close_date) - julianday(create_date)",
            ))
            .load::<ProjectDB>(&mut conn)?;

        Ok(results.into_iter().map(Project::from).collect())
    }

    /// Re-reads a project row inside the caller's write transaction, so
    /// state-dependent checks run against data no other writer can change
    /// before commit
    fn load_for_update(&self, conn: &mut SqliteConnection, project_id: &str) -> Result<ProjectDB> {
        Ok(projects
            .find(project_id)
            .first::<ProjectDB>(conn)
            .optional()?
            .ok_or_else(|| ProjectError::NotFound(project_id.to_string()))?)
    }

    /// Inserts a new project row inside the caller's transaction
    fn insert(&self, conn: &mut SqliteConnection, mut row: ProjectDB) -> Result<ProjectDB> {
        if row.id.is_empty() {
            row.id = uuid::Uuid::new_v4().to_string();
        }

        Ok(diesel::insert_into(projects::table)
            .values(&row)
            .returning(projects::all_columns)
            .get_result(conn)?)
    }

    /// Updates an existing project row inside the caller's transaction
    fn update(&self, conn: &mut SqliteConnection, row: ProjectDB) -> Result<ProjectDB> {
        diesel::update(projects.find(&row.id))
            .set(&row)
            .execute(conn)?;

        Ok(projects.find(&row.id).first::<ProjectDB>(conn)?)
    }

    /// Deletes a project by its ID inside the caller's transaction
    fn delete(&self, conn: &mut SqliteConnection, project_id: &str) -> Result<usize> {
        let affected = diesel::delete(projects.find(project_id)).execute(conn)?;

        if affected == 0 {
            return Err(ProjectError::NotFound(project_id.to_string()).into());
        }

        Ok(affected)
    }

    /// Loads every project with remaining capacity, ordered by arrival.
    /// The uuid id is the stable tie-break for equal create dates.
    fn load_unsatisfied(&self, conn: &mut SqliteConnection) -> Result<Vec<ProjectDB>> {
        Ok(projects
            .filter(fully_invested.eq(false))
            .order((create_date.asc(), id.asc()))
            .load::<ProjectDB>(conn)?)
    }

    /// Writes back the allocation-owned columns of every mutated row inside
    /// the caller's transaction
    fn save_invested(&self, conn: &mut SqliteConnection, rows: &[ProjectDB]) -> Result<()> {
        for row in rows {
            diesel::update(projects.find(&row.id))
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
