//! Row ↔ record mapping at the store boundary.
//!
//! Table rows use storage naming and signed integer day counts; core records
//! use typed IDs and `u32` days. All conversion between the two lives here.
//!
//! Money columns are `NUMERIC(19, 2)`. Amounts with finer scale are rejected by
//! core validation before they reach a row.

use chrono::{DateTime, FixedOffset};
use sea_orm::Set;
use sppd_core::budget::BudgetLine;
use sppd_core::rates::RateEntry;
use sppd_core::travel::{Assignment, CostLine, TravelType, Traveler};
use sppd_shared::types::{AssignmentId, TravelerId};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::{
    assignments, budget_lines, cost_lines, rate_entries, sea_orm_active_enums, travelers,
};

/// A stored row that cannot be represented as a core record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    /// Day count outside the representable range.
    #[error("Invalid day count {value} in {table}.{column}")]
    InvalidDays {
        /// Table name.
        table: &'static str,
        /// Column name.
        column: &'static str,
        /// Stored value.
        value: i64,
    },
}

/// Timestamp written to `created_at` / `updated_at`.
pub type Timestamp = DateTime<FixedOffset>;

impl From<sea_orm_active_enums::TravelType> for TravelType {
    fn from(value: sea_orm_active_enums::TravelType) -> Self {
        match value {
            sea_orm_active_enums::TravelType::WithinRegion => Self::WithinRegion,
            sea_orm_active_enums::TravelType::OutOfRegion => Self::OutOfRegion,
        }
    }
}

impl From<TravelType> for sea_orm_active_enums::TravelType {
    fn from(value: TravelType) -> Self {
        match value {
            TravelType::WithinRegion => Self::WithinRegion,
            TravelType::OutOfRegion => Self::OutOfRegion,
        }
    }
}

fn days_from_row(table: &'static str, column: &'static str, value: i32) -> Result<u32, MappingError> {
    u32::try_from(value).map_err(|_| MappingError::InvalidDays {
        table,
        column,
        value: i64::from(value),
    })
}

fn days_to_row(table: &'static str, column: &'static str, value: u32) -> Result<i32, MappingError> {
    i32::try_from(value).map_err(|_| MappingError::InvalidDays {
        table,
        column,
        value: i64::from(value),
    })
}

// ============================================================================
// Travelers
// ============================================================================

/// Maps a traveler row.
#[must_use]
pub fn traveler_from_row(row: travelers::Model) -> Traveler {
    Traveler {
        id: TravelerId::from_uuid(row.id),
        name: row.name,
        nip: row.nip,
        rank: row.rank,
        position: row.position,
        representation_within_region: row.representation_within_region,
        representation_out_of_region: row.representation_out_of_region,
    }
}

/// Builds an insert/update model for a traveler.
#[must_use]
pub fn traveler_to_row(traveler: &Traveler, now: Timestamp) -> travelers::ActiveModel {
    travelers::ActiveModel {
        id: Set(traveler.id.into_inner()),
        name: Set(traveler.name.clone()),
        nip: Set(traveler.nip.clone()),
        rank: Set(traveler.rank.clone()),
        position: Set(traveler.position.clone()),
        representation_within_region: Set(traveler.representation_within_region),
        representation_out_of_region: Set(traveler.representation_out_of_region),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

// ============================================================================
// Budget lines
// ============================================================================

/// Maps a budget line row.
#[must_use]
pub fn budget_line_from_row(row: budget_lines::Model) -> BudgetLine {
    BudgetLine {
        code: row.code,
        name: row.name,
        budget_ceiling: row.budget_ceiling,
        disbursement_ceiling: row.disbursement_ceiling,
        q1: row.q1,
        q2: row.q2,
        q3: row.q3,
        q4: row.q4,
    }
}

/// Builds an insert/update model for a budget line.
#[must_use]
pub fn budget_line_to_row(line: &BudgetLine, now: Timestamp) -> budget_lines::ActiveModel {
    budget_lines::ActiveModel {
        code: Set(line.code.clone()),
        name: Set(line.name.clone()),
        budget_ceiling: Set(line.budget_ceiling),
        disbursement_ceiling: Set(line.disbursement_ceiling.clone()),
        q1: Set(line.q1),
        q2: Set(line.q2),
        q3: Set(line.q3),
        q4: Set(line.q4),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

// ============================================================================
// Rate entries
// ============================================================================

/// Maps a rate entry row.
#[must_use]
pub fn rate_entry_from_row(row: rate_entries::Model) -> RateEntry {
    RateEntry {
        destination: row.destination,
        daily_allowance: row.daily_allowance,
        lodging: row.lodging,
        fuel_transport: row.fuel_transport,
        sea_transport: row.sea_transport,
        air_transport: row.air_transport,
        local_transport: row.local_transport,
    }
}

/// Builds an insert/update model for a rate entry.
#[must_use]
pub fn rate_entry_to_row(entry: &RateEntry, now: Timestamp) -> rate_entries::ActiveModel {
    rate_entries::ActiveModel {
        destination: Set(entry.destination.clone()),
        daily_allowance: Set(entry.daily_allowance),
        lodging: Set(entry.lodging),
        fuel_transport: Set(entry.fuel_transport),
        sea_transport: Set(entry.sea_transport),
        air_transport: Set(entry.air_transport),
        local_transport: Set(entry.local_transport),
        updated_at: Set(now),
    }
}

// ============================================================================
// Assignments
// ============================================================================

/// Maps a cost line row.
///
/// # Errors
///
/// Returns `MappingError::InvalidDays` for a negative day count.
pub fn cost_line_from_row(row: &cost_lines::Model) -> Result<CostLine, MappingError> {
    Ok(CostLine {
        traveler_id: TravelerId::from_uuid(row.traveler_id),
        daily_allowance: row.daily_allowance,
        daily_days: days_from_row("cost_lines", "daily_days", row.daily_days)?,
        lodging: row.lodging,
        lodging_days: days_from_row("cost_lines", "lodging_days", row.lodging_days)?,
        fuel_transport: row.fuel_transport,
        sea_transport: row.sea_transport,
        air_transport: row.air_transport,
        local_transport: row.local_transport,
        representation: row.representation,
        representation_days: days_from_row(
            "cost_lines",
            "representation_days",
            row.representation_days,
        )?,
    })
}

/// Maps an assignment row and its cost line rows.
///
/// Lines are ordered by `position`; the traveler list follows the same order.
///
/// # Errors
///
/// Returns `MappingError::InvalidDays` for a negative day count.
pub fn assignment_from_rows(
    row: assignments::Model,
    mut lines: Vec<cost_lines::Model>,
) -> Result<Assignment, MappingError> {
    lines.sort_by_key(|l| l.position);
    let cost_lines = lines
        .iter()
        .map(cost_line_from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Assignment {
        id: AssignmentId::from_uuid(row.id),
        assignment_number: row.assignment_number,
        purpose: row.purpose,
        budget_line_code: row.budget_line_code,
        origin: row.origin,
        destination: row.destination,
        travel_type: row.travel_type.into(),
        transportation: row.transportation,
        start_date: row.start_date,
        end_date: row.end_date,
        duration_days: days_from_row("assignments", "duration_days", row.duration_days)?,
        traveler_ids: cost_lines.iter().map(|c| c.traveler_id).collect(),
        cost_lines,
    })
}

/// Builds the assignment row and its cost line rows.
///
/// # Errors
///
/// Returns `MappingError::InvalidDays` when a day count does not fit the column.
pub fn assignment_to_rows(
    assignment: &Assignment,
    now: Timestamp,
) -> Result<(assignments::ActiveModel, Vec<cost_lines::ActiveModel>), MappingError> {
    let assignment_id: Uuid = assignment.id.into_inner();

    let row = assignments::ActiveModel {
        id: Set(assignment_id),
        assignment_number: Set(assignment.assignment_number.clone()),
        purpose: Set(assignment.purpose.clone()),
        budget_line_code: Set(assignment.budget_line_code.clone()),
        origin: Set(assignment.origin.clone()),
        destination: Set(assignment.destination.clone()),
        travel_type: Set(assignment.travel_type.into()),
        transportation: Set(assignment.transportation.clone()),
        start_date: Set(assignment.start_date),
        end_date: Set(assignment.end_date),
        duration_days: Set(days_to_row(
            "assignments",
            "duration_days",
            assignment.duration_days,
        )?),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let lines = assignment
        .cost_lines
        .iter()
        .zip(0..)
        .map(|(line, position)| {
            Ok(cost_lines::ActiveModel {
                assignment_id: Set(assignment_id),
                traveler_id: Set(line.traveler_id.into_inner()),
                position: Set(position),
                daily_allowance: Set(line.daily_allowance),
                daily_days: Set(days_to_row("cost_lines", "daily_days", line.daily_days)?),
                lodging: Set(line.lodging),
                lodging_days: Set(days_to_row("cost_lines", "lodging_days", line.lodging_days)?),
                fuel_transport: Set(line.fuel_transport),
                sea_transport: Set(line.sea_transport),
                air_transport: Set(line.air_transport),
                local_transport: Set(line.local_transport),
                representation: Set(line.representation),
                representation_days: Set(days_to_row(
                    "cost_lines",
                    "representation_days",
                    line.representation_days,
                )?),
            })
        })
        .collect::<Result<Vec<_>, MappingError>>()?;

    Ok((row, lines))
}

#[cfg(test)]
#[path = "mapper_tests.rs"]
mod tests;
