//! Traveler repository.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, TransactionTrait};
use sppd_core::integrity::{ReferenceKind, ReferentialIntegrityError, ensure_unreferenced};
use sppd_core::travel::Traveler;
use sppd_shared::AppError;
use sppd_shared::types::{TravelerId, fits_amount_scale};
use tracing::{info, warn};

use super::assignment::load_assignments;
use crate::entities::travelers;
use crate::mapper::{MappingError, traveler_from_row, traveler_to_row};

/// Error types for traveler operations.
#[derive(Debug, thiserror::Error)]
pub enum TravelerError {
    /// Name is blank.
    #[error("Traveler name is required")]
    EmptyName,

    /// Representation rate is negative.
    #[error("Representation rate cannot be negative")]
    NegativeRepresentation,

    /// Representation rate has more than two decimal places.
    #[error("Representation rate cannot have more than two decimal places")]
    TooPreciseRepresentation,

    /// Traveler not found.
    #[error("Traveler not found: {0}")]
    NotFound(TravelerId),

    /// Traveler still on assignments.
    #[error(transparent)]
    Referenced(#[from] ReferentialIntegrityError),

    /// Stored row could not be mapped.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<TravelerError> for AppError {
    fn from(err: TravelerError) -> Self {
        match err {
            TravelerError::EmptyName
            | TravelerError::NegativeRepresentation
            | TravelerError::TooPreciseRepresentation => {
                Self::Validation(err.to_string())
            }
            TravelerError::NotFound(id) => Self::NotFound(format!("Traveler {id}")),
            TravelerError::Referenced(e) => Self::ReferentialIntegrity(e.to_string()),
            TravelerError::Mapping(e) => Self::Internal(e.to_string()),
            TravelerError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Traveler repository.
#[derive(Debug, Clone)]
pub struct TravelerRepository {
    db: DatabaseConnection,
}

impl TravelerRepository {
    /// Creates a new traveler repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists travelers ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<Traveler>, TravelerError> {
        let rows = travelers::Entity::find()
            .order_by_asc(travelers::Column::Name)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(traveler_from_row).collect())
    }

    /// Gets a traveler by ID.
    ///
    /// # Errors
    ///
    /// Returns `TravelerError::NotFound` if it does not exist.
    pub async fn get(&self, id: TravelerId) -> Result<Traveler, TravelerError> {
        travelers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(traveler_from_row)
            .ok_or(TravelerError::NotFound(id))
    }

    /// Validates and saves a traveler.
    ///
    /// Assignments keep the representation rate priced at the time; editing a
    /// traveler never re-prices saved cost lines.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, or for a negative rate or
    /// one with more than two decimal places.
    pub async fn upsert(&self, traveler: &Traveler) -> Result<(), TravelerError> {
        if traveler.name.trim().is_empty() {
            return Err(TravelerError::EmptyName);
        }
        if traveler.representation_within_region < Decimal::ZERO
            || traveler.representation_out_of_region < Decimal::ZERO
        {
            return Err(TravelerError::NegativeRepresentation);
        }
        if !fits_amount_scale(traveler.representation_within_region)
            || !fits_amount_scale(traveler.representation_out_of_region)
        {
            return Err(TravelerError::TooPreciseRepresentation);
        }

        travelers::Entity::insert(traveler_to_row(traveler, Utc::now().into()))
            .on_conflict(
                OnConflict::column(travelers::Column::Id)
                    .update_columns([
                        travelers::Column::Name,
                        travelers::Column::Nip,
                        travelers::Column::Rank,
                        travelers::Column::Position,
                        travelers::Column::RepresentationWithinRegion,
                        travelers::Column::RepresentationOutOfRegion,
                        travelers::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        info!(traveler_id = %traveler.id, "traveler saved");
        Ok(())
    }

    /// Deletes a traveler unless they are on any assignment.
    ///
    /// # Errors
    ///
    /// Returns `TravelerError::NotFound` if absent and
    /// `TravelerError::Referenced` if any assignment lists the traveler.
    pub async fn delete(&self, id: TravelerId) -> Result<(), TravelerError> {
        let txn = self.db.begin().await?;

        travelers::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await?
            .ok_or(TravelerError::NotFound(id))?;

        let assignments = load_assignments::<_, TravelerError>(&txn).await?;
        let key = id.to_string();
        if let Err(err) = ensure_unreferenced(ReferenceKind::Traveler, &key, &assignments) {
            warn!(traveler_id = %id, references = err.references, "traveler delete refused");
            return Err(err.into());
        }

        travelers::Entity::delete_by_id(id.into_inner())
            .exec(&txn)
            .await?;
        txn.commit().await?;

        info!(traveler_id = %id, "traveler deleted");
        Ok(())
    }
}
