//! Assignment validation error types.

use chrono::NaiveDate;
use sppd_shared::types::TravelerId;
use thiserror::Error;

use super::types::{CostField, TravelType};

/// Errors raised when an assignment edit or save is rejected.
///
/// A rejected edit leaves the assignment exactly as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignmentError {
    /// Return date precedes departure date.
    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidRange {
        /// Departure date.
        start: NaiveDate,
        /// Return date.
        end: NaiveDate,
    },

    /// Departure or return date missing.
    #[error("Departure and return dates are required")]
    MissingDates,

    /// Stored duration disagrees with the dates.
    #[error("Duration mismatch: dates give {expected} days, assignment has {actual}")]
    DurationMismatch {
        /// Inclusive day count from the dates.
        expected: u32,
        /// Stored duration.
        actual: u32,
    },

    /// Cost line or edit refers to a traveler not on the assignment.
    #[error("Traveler {0} is not part of this assignment")]
    UnknownTraveler(TravelerId),

    /// Traveler listed or priced more than once.
    #[error("Traveler {0} appears more than once")]
    DuplicateTraveler(TravelerId),

    /// Selected traveler has no cost line.
    #[error("Traveler {0} has no cost line")]
    MissingCostLine(TravelerId),

    /// No traveler selected.
    #[error("At least one traveler must be selected")]
    NoTravelers,

    /// Destination not chosen.
    #[error("Destination is required")]
    MissingDestination,

    /// Destination not valid for the travel type.
    #[error("Destination '{destination}' is not valid for {travel_type} travel")]
    DestinationNotAllowed {
        /// Rejected destination.
        destination: String,
        /// Travel type in effect.
        travel_type: TravelType,
    },

    /// Negative cost amount.
    #[error("Cost field '{}' cannot be negative for traveler {traveler_id}", .field.as_str())]
    NegativeAmount {
        /// Traveler whose line is invalid.
        traveler_id: TravelerId,
        /// Offending field.
        field: CostField,
    },

    /// Cost amount has more decimal places than storage keeps.
    #[error("Cost field '{}' has more than two decimal places for traveler {traveler_id}", .field.as_str())]
    TooPrecise {
        /// Traveler whose line is invalid.
        traveler_id: TravelerId,
        /// Offending field.
        field: CostField,
    },

    /// Budget line code not set.
    #[error("Budget line code is required")]
    MissingBudgetLine,
}
