//! Assignment repository for travel assignments and their cost lines.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use sppd_core::travel::{Assignment, AssignmentError, DestinationCatalog, validate_assignment};
use sppd_shared::AppError;
use sppd_shared::types::AssignmentId;
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::{assignments, budget_lines, cost_lines, travelers};
use crate::mapper::{MappingError, assignment_from_rows, assignment_to_rows};

/// Error types for assignment operations.
#[derive(Debug, thiserror::Error)]
pub enum AssignmentRepoError {
    /// Assignment rejected by validation.
    #[error(transparent)]
    Invalid(#[from] AssignmentError),

    /// Assignment not found.
    #[error("Assignment not found: {0}")]
    NotFound(AssignmentId),

    /// Charged budget line does not exist.
    #[error("Budget line not found: {0}")]
    BudgetLineNotFound(String),

    /// Stored row could not be mapped.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AssignmentRepoError> for AppError {
    fn from(err: AssignmentRepoError) -> Self {
        match err {
            AssignmentRepoError::Invalid(e) => Self::Validation(e.to_string()),
            AssignmentRepoError::NotFound(id) => Self::NotFound(format!("Assignment {id}")),
            AssignmentRepoError::BudgetLineNotFound(code) => {
                Self::Validation(format!("Budget line {code} does not exist"))
            }
            AssignmentRepoError::Mapping(e) => Self::Internal(e.to_string()),
            AssignmentRepoError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Loads every assignment with its cost lines, oldest first.
///
/// Shared by the guarded deletes so the reference check and the delete see
/// the same transaction snapshot.
pub(crate) async fn load_assignments<C, E>(conn: &C) -> Result<Vec<Assignment>, E>
where
    C: ConnectionTrait,
    E: From<DbErr> + From<MappingError>,
{
    let rows = assignments::Entity::find()
        .order_by_asc(assignments::Column::CreatedAt)
        .order_by_asc(assignments::Column::Id)
        .all(conn)
        .await?;

    let mut lines_by_assignment: HashMap<Uuid, Vec<cost_lines::Model>> = HashMap::new();
    for line in cost_lines::Entity::find().all(conn).await? {
        lines_by_assignment
            .entry(line.assignment_id)
            .or_default()
            .push(line);
    }

    let assignments = rows
        .into_iter()
        .map(|row| {
            let lines = lines_by_assignment.remove(&row.id).unwrap_or_default();
            assignment_from_rows(row, lines)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = assignments.len(), "assignments loaded");
    Ok(assignments)
}

/// Assignment repository.
#[derive(Debug, Clone)]
pub struct AssignmentRepository {
    db: DatabaseConnection,
}

impl AssignmentRepository {
    /// Creates a new assignment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists every assignment with its cost lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub async fn list_all(&self) -> Result<Vec<Assignment>, AssignmentRepoError> {
        load_assignments(&self.db).await
    }

    /// Gets one assignment.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentRepoError::NotFound` if it does not exist.
    pub async fn get(&self, id: AssignmentId) -> Result<Assignment, AssignmentRepoError> {
        let row = assignments::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(AssignmentRepoError::NotFound(id))?;

        let lines = cost_lines::Entity::find()
            .filter(cost_lines::Column::AssignmentId.eq(id.into_inner()))
            .order_by_asc(cost_lines::Column::Position)
            .all(&self.db)
            .await?;

        Ok(assignment_from_rows(row, lines)?)
    }

    /// Validates and saves an assignment, replacing its cost lines.
    ///
    /// The budget line and every traveler must exist. Over-realization of the
    /// budget line is not checked; the reconciliation report shows it.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentRepoError::Invalid` when validation fails,
    /// `AssignmentRepoError::BudgetLineNotFound` for an unknown budget line,
    /// or a database error. Nothing is written on error.
    pub async fn upsert(
        &self,
        assignment: &Assignment,
        catalog: &DestinationCatalog,
    ) -> Result<(), AssignmentRepoError> {
        validate_assignment(assignment, catalog)?;
        let (row, lines) = assignment_to_rows(assignment, Utc::now().into())?;

        let txn = self.db.begin().await?;

        budget_lines::Entity::find_by_id(assignment.budget_line_code.clone())
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AssignmentRepoError::BudgetLineNotFound(assignment.budget_line_code.clone())
            })?;

        let traveler_ids: Vec<Uuid> = assignment
            .traveler_ids
            .iter()
            .map(|id| id.into_inner())
            .collect();
        let known = travelers::Entity::find()
            .filter(travelers::Column::Id.is_in(traveler_ids))
            .all(&txn)
            .await?;
        if let Some(unknown) = assignment
            .traveler_ids
            .iter()
            .find(|id| !known.iter().any(|t| t.id == id.into_inner()))
        {
            return Err(AssignmentError::UnknownTraveler(*unknown).into());
        }

        assignments::Entity::insert(row)
            .on_conflict(
                OnConflict::column(assignments::Column::Id)
                    .update_columns([
                        assignments::Column::AssignmentNumber,
                        assignments::Column::Purpose,
                        assignments::Column::BudgetLineCode,
                        assignments::Column::Origin,
                        assignments::Column::Destination,
                        assignments::Column::TravelType,
                        assignments::Column::Transportation,
                        assignments::Column::StartDate,
                        assignments::Column::EndDate,
                        assignments::Column::DurationDays,
                        assignments::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&txn)
            .await?;

        cost_lines::Entity::delete_many()
            .filter(cost_lines::Column::AssignmentId.eq(assignment.id.into_inner()))
            .exec(&txn)
            .await?;
        if !lines.is_empty() {
            cost_lines::Entity::insert_many(lines).exec(&txn).await?;
        }

        txn.commit().await?;

        info!(
            assignment_id = %assignment.id,
            budget_line = %assignment.budget_line_code,
            travelers = assignment.traveler_ids.len(),
            "assignment saved"
        );
        Ok(())
    }

    /// Deletes an assignment and its cost lines.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentRepoError::NotFound` if it does not exist.
    pub async fn delete(&self, id: AssignmentId) -> Result<(), AssignmentRepoError> {
        let result = assignments::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AssignmentRepoError::NotFound(id));
        }

        info!(assignment_id = %id, "assignment deleted");
        Ok(())
    }
}
