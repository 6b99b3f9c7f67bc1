//! Budget line repository.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, TransactionTrait};
use sppd_core::budget::{BudgetError, BudgetLine, BudgetReconciler};
use sppd_core::integrity::ReferentialIntegrityError;
use sppd_shared::AppError;
use tracing::{info, warn};

use super::assignment::load_assignments;
use crate::entities::budget_lines;
use crate::mapper::{MappingError, budget_line_from_row, budget_line_to_row};

/// Error types for budget line operations.
#[derive(Debug, thiserror::Error)]
pub enum BudgetLineError {
    /// Budget line rejected by validation.
    #[error(transparent)]
    Invalid(#[from] BudgetError),

    /// Budget line not found.
    #[error("Budget line not found: {0}")]
    NotFound(String),

    /// Budget line still charged by assignments.
    #[error(transparent)]
    Referenced(#[from] ReferentialIntegrityError),

    /// Stored row could not be mapped.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<BudgetLineError> for AppError {
    fn from(err: BudgetLineError) -> Self {
        match err {
            BudgetLineError::Invalid(e) => Self::Validation(e.to_string()),
            BudgetLineError::NotFound(code) => Self::NotFound(format!("Budget line {code}")),
            BudgetLineError::Referenced(e) => Self::ReferentialIntegrity(e.to_string()),
            BudgetLineError::Mapping(e) => Self::Internal(e.to_string()),
            BudgetLineError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Budget line repository.
#[derive(Debug, Clone)]
pub struct BudgetLineRepository {
    db: DatabaseConnection,
}

impl BudgetLineRepository {
    /// Creates a new budget line repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists budget lines ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<BudgetLine>, BudgetLineError> {
        let rows = budget_lines::Entity::find()
            .order_by_asc(budget_lines::Column::Code)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(budget_line_from_row).collect())
    }

    /// Gets a budget line by code.
    ///
    /// # Errors
    ///
    /// Returns `BudgetLineError::NotFound` if it does not exist.
    pub async fn get(&self, code: &str) -> Result<BudgetLine, BudgetLineError> {
        budget_lines::Entity::find_by_id(code.to_string())
            .one(&self.db)
            .await?
            .map(budget_line_from_row)
            .ok_or_else(|| BudgetLineError::NotFound(code.to_string()))
    }

    /// Validates and saves a budget line.
    ///
    /// # Errors
    ///
    /// Returns `BudgetLineError::Invalid` for a blank code or negative amount.
    pub async fn upsert(&self, line: &BudgetLine) -> Result<(), BudgetLineError> {
        BudgetReconciler::validate_budget_line(line)?;

        budget_lines::Entity::insert(budget_line_to_row(line, Utc::now().into()))
            .on_conflict(
                OnConflict::column(budget_lines::Column::Code)
                    .update_columns([
                        budget_lines::Column::Name,
                        budget_lines::Column::BudgetCeiling,
                        budget_lines::Column::DisbursementCeiling,
                        budget_lines::Column::Q1,
                        budget_lines::Column::Q2,
                        budget_lines::Column::Q3,
                        budget_lines::Column::Q4,
                        budget_lines::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        info!(code = %line.code, ceiling = %line.budget_ceiling, "budget line saved");
        Ok(())
    }

    /// Deletes a budget line unless assignments are charged to it.
    ///
    /// # Errors
    ///
    /// Returns `BudgetLineError::NotFound` if absent and
    /// `BudgetLineError::Referenced` if any assignment uses the code. Neither
    /// the line nor any assignment changes on error.
    pub async fn delete(&self, code: &str) -> Result<(), BudgetLineError> {
        let txn = self.db.begin().await?;

        budget_lines::Entity::find_by_id(code.to_string())
            .one(&txn)
            .await?
            .ok_or_else(|| BudgetLineError::NotFound(code.to_string()))?;

        let assignments = load_assignments::<_, BudgetLineError>(&txn).await?;
        if let Err(err) = BudgetReconciler::ensure_deletable(code, &assignments) {
            warn!(code, references = err.references, "budget line delete refused");
            return Err(err.into());
        }

        budget_lines::Entity::delete_by_id(code.to_string())
            .exec(&txn)
            .await?;
        txn.commit().await?;

        info!(code, "budget line deleted");
        Ok(())
    }
}
