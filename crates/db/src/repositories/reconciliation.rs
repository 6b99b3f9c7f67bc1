//! Reconciliation repository: consistent snapshots for reports.

use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, TransactionTrait};
use sppd_core::budget::{BudgetLine, BudgetReconciler, ReconciliationReport};
use sppd_core::travel::Assignment;
use sppd_shared::AppError;
use tracing::debug;

use super::assignment::load_assignments;
use crate::entities::budget_lines;
use crate::mapper::{MappingError, budget_line_from_row};

/// Error types for reconciliation queries.
#[derive(Debug, thiserror::Error)]
pub enum ReconciliationError {
    /// Stored row could not be mapped.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReconciliationError> for AppError {
    fn from(err: ReconciliationError) -> Self {
        match err {
            ReconciliationError::Mapping(e) => Self::Internal(e.to_string()),
            ReconciliationError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Budget lines and assignments read in one transaction.
#[derive(Debug, Clone)]
pub struct ReconciliationSnapshot {
    /// All budget lines, ordered by code.
    pub budget_lines: Vec<BudgetLine>,
    /// All assignments with their cost lines.
    pub assignments: Vec<Assignment>,
}

/// Reconciliation repository.
#[derive(Debug, Clone)]
pub struct ReconciliationRepository {
    db: DatabaseConnection,
}

impl ReconciliationRepository {
    /// Creates a new reconciliation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reads budget lines and assignments from one consistent snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a stored row is invalid.
    pub async fn snapshot(&self) -> Result<ReconciliationSnapshot, ReconciliationError> {
        let txn = self.db.begin().await?;

        let budget_lines = budget_lines::Entity::find()
            .order_by_asc(budget_lines::Column::Code)
            .all(&txn)
            .await?
            .into_iter()
            .map(budget_line_from_row)
            .collect::<Vec<_>>();
        let assignments = load_assignments::<_, ReconciliationError>(&txn).await?;

        txn.commit().await?;

        debug!(
            budget_lines = budget_lines.len(),
            assignments = assignments.len(),
            "reconciliation snapshot loaded"
        );
        Ok(ReconciliationSnapshot {
            budget_lines,
            assignments,
        })
    }

    /// Builds the realization report from a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read.
    pub async fn report(&self) -> Result<ReconciliationReport, ReconciliationError> {
        let snapshot = self.snapshot().await?;
        Ok(BudgetReconciler::reconcile(
            &snapshot.budget_lines,
            &snapshot.assignments,
        ))
    }
}
