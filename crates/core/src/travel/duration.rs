//! Trip duration arithmetic.

use chrono::NaiveDate;

use super::error::AssignmentError;

/// Inclusive day count between departure and return.
///
/// A same-day trip counts as one day.
///
/// # Errors
///
/// Returns `AssignmentError::InvalidRange` when `end` precedes `start`.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> Result<u32, AssignmentError> {
    if end < start {
        return Err(AssignmentError::InvalidRange { start, end });
    }

    let days = (end - start).num_days() + 1;
    Ok(u32::try_from(days).unwrap_or(u32::MAX))
}

/// Nights of lodging for a trip of `duration_days` days.
#[must_use]
pub const fn lodging_nights(duration_days: u32) -> u32 {
    duration_days.saturating_sub(1)
}
