//! Rate entry repository for the per-destination rate table.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, TransactionTrait};
use sppd_core::integrity::{ReferenceKind, ReferentialIntegrityError, ensure_unreferenced};
use sppd_core::rates::{RateEntry, RateError, RateTable};
use sppd_shared::AppError;
use tracing::{info, warn};

use super::assignment::load_assignments;
use crate::entities::rate_entries;
use crate::mapper::{MappingError, rate_entry_from_row, rate_entry_to_row};

/// Error types for rate entry operations.
#[derive(Debug, thiserror::Error)]
pub enum RateEntryError {
    /// Entry rejected by rate table rules.
    #[error(transparent)]
    Invalid(#[from] RateError),

    /// Rate entry not found.
    #[error("Rate entry not found: {0}")]
    NotFound(String),

    /// Entry still used by assignments.
    #[error(transparent)]
    Referenced(#[from] ReferentialIntegrityError),

    /// Stored row could not be mapped.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RateEntryError> for AppError {
    fn from(err: RateEntryError) -> Self {
        match err {
            RateEntryError::Invalid(e) => Self::Validation(e.to_string()),
            RateEntryError::NotFound(destination) => {
                Self::NotFound(format!("Rate entry {destination}"))
            }
            RateEntryError::Referenced(e) => Self::ReferentialIntegrity(e.to_string()),
            RateEntryError::Mapping(e) => Self::Internal(e.to_string()),
            RateEntryError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Rate entry repository.
#[derive(Debug, Clone)]
pub struct RateEntryRepository {
    db: DatabaseConnection,
}

impl RateEntryRepository {
    /// Creates a new rate entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the full rate table.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored entry is invalid.
    pub async fn list(&self) -> Result<RateTable, RateEntryError> {
        let rows = rate_entries::Entity::find()
            .order_by_asc(rate_entries::Column::Destination)
            .all(&self.db)
            .await?;

        Ok(RateTable::try_from_entries(
            rows.into_iter().map(rate_entry_from_row),
        )?)
    }

    /// Inserts or wholly replaces the entry for its destination.
    ///
    /// # Errors
    ///
    /// Returns `RateEntryError::Invalid` for a blank destination or negative rate.
    pub async fn upsert(&self, entry: &RateEntry) -> Result<(), RateEntryError> {
        entry.validate()?;

        rate_entries::Entity::insert(rate_entry_to_row(entry, Utc::now().into()))
            .on_conflict(
                OnConflict::column(rate_entries::Column::Destination)
                    .update_columns([
                        rate_entries::Column::DailyAllowance,
                        rate_entries::Column::Lodging,
                        rate_entries::Column::FuelTransport,
                        rate_entries::Column::SeaTransport,
                        rate_entries::Column::AirTransport,
                        rate_entries::Column::LocalTransport,
                        rate_entries::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        info!(destination = %entry.destination, "rate entry saved");
        Ok(())
    }

    /// Deletes the entry for a destination unless assignments still use it.
    ///
    /// # Errors
    ///
    /// Returns `RateEntryError::NotFound` if absent and
    /// `RateEntryError::Referenced` if any assignment has this destination.
    pub async fn delete(&self, destination: &str) -> Result<(), RateEntryError> {
        let txn = self.db.begin().await?;

        rate_entries::Entity::find_by_id(destination.to_string())
            .one(&txn)
            .await?
            .ok_or_else(|| RateEntryError::NotFound(destination.to_string()))?;

        let assignments = load_assignments::<_, RateEntryError>(&txn).await?;
        if let Err(err) = ensure_unreferenced(ReferenceKind::RateEntry, destination, &assignments) {
            warn!(destination, references = err.references, "rate entry delete refused");
            return Err(err.into());
        }

        rate_entries::Entity::delete_by_id(destination.to_string())
            .exec(&txn)
            .await?;
        txn.commit().await?;

        info!(destination, "rate entry deleted");
        Ok(())
    }
}
