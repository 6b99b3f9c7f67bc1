//! Dashboard data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sppd_shared::types::{AssignmentId, TravelerId};

use crate::travel::TravelType;

/// Assignment counts by travel type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelStats {
    /// Number of assignments.
    pub total: usize,
    /// Within-region assignments.
    pub within_region: usize,
    /// Out-of-region assignments.
    pub out_of_region: usize,
    /// Within-region share, whole percent.
    pub within_region_percent: Decimal,
    /// Out-of-region share, whole percent.
    pub out_of_region_percent: Decimal,
    /// Within-region assignments per catalog destination, busiest first.
    pub destination_counts: Vec<DestinationCount>,
}

/// Assignment count for one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationCount {
    /// Destination name.
    pub destination: String,
    /// Number of assignments.
    pub count: usize,
}

/// One trip in a traveler's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelerHistoryEntry {
    /// Assignment ID.
    pub assignment_id: AssignmentId,
    /// Assignment letter number.
    pub assignment_number: String,
    /// Destination.
    pub destination: String,
    /// Travel type.
    pub travel_type: TravelType,
    /// Departure date.
    pub start_date: Option<NaiveDate>,
    /// Return date.
    pub end_date: Option<NaiveDate>,
    /// Trip length in days.
    pub duration_days: u32,
    /// Amount received by the traveler on this trip.
    pub amount: Decimal,
}

/// Trips made by one traveler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelerHistory {
    /// Traveler ID.
    pub traveler_id: TravelerId,
    /// Trips, in snapshot order.
    pub entries: Vec<TravelerHistoryEntry>,
    /// Total days travelled.
    pub total_days: u32,
    /// Total amount received.
    pub total_amount: Decimal,
}
