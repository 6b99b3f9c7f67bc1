//! Dashboard statistics over an assignment snapshot.

use rust_decimal::{Decimal, RoundingStrategy};
use sppd_shared::types::TravelerId;

use super::types::{DestinationCount, TravelStats, TravelerHistory, TravelerHistoryEntry};
use crate::travel::{Assignment, AssignmentCostAggregator, DestinationCatalog, TravelType};

/// Dashboard service.
pub struct DashboardService;

impl DashboardService {
    /// Counts assignments by travel type and within-region destination.
    ///
    /// Every within-region catalog destination is listed, including those
    /// with no assignments; ties keep catalog order.
    #[must_use]
    pub fn travel_stats(assignments: &[Assignment], catalog: &DestinationCatalog) -> TravelStats {
        let total = assignments.len();
        let within_region = assignments
            .iter()
            .filter(|a| a.travel_type == TravelType::WithinRegion)
            .count();
        let out_of_region = total - within_region;

        let mut destination_counts: Vec<DestinationCount> = catalog
            .allowed(TravelType::WithinRegion)
            .iter()
            .map(|destination| DestinationCount {
                destination: destination.clone(),
                count: assignments
                    .iter()
                    .filter(|a| {
                        a.travel_type == TravelType::WithinRegion && &a.destination == destination
                    })
                    .count(),
            })
            .collect();
        destination_counts.sort_by(|a, b| b.count.cmp(&a.count));

        TravelStats {
            total,
            within_region,
            out_of_region,
            within_region_percent: Self::share_percent(within_region, total),
            out_of_region_percent: Self::share_percent(out_of_region, total),
            destination_counts,
        }
    }

    /// Trips a traveler took and what they received.
    #[must_use]
    pub fn traveler_history(traveler_id: TravelerId, assignments: &[Assignment]) -> TravelerHistory {
        let entries: Vec<TravelerHistoryEntry> = assignments
            .iter()
            .filter_map(|a| {
                let amount = AssignmentCostAggregator::traveler_total(a, traveler_id)?;
                Some(TravelerHistoryEntry {
                    assignment_id: a.id,
                    assignment_number: a.assignment_number.clone(),
                    destination: a.destination.clone(),
                    travel_type: a.travel_type,
                    start_date: a.start_date,
                    end_date: a.end_date,
                    duration_days: a.duration_days,
                    amount,
                })
            })
            .collect();

        TravelerHistory {
            traveler_id,
            total_days: entries.iter().map(|e| e.duration_days).sum(),
            total_amount: entries.iter().map(|e| e.amount).sum(),
            entries,
        }
    }

    /// Whole-number percentage, halves rounded up; zero when `total` is zero.
    fn share_percent(part: usize, total: usize) -> Decimal {
        if total == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(part) / Decimal::from(total) * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }
}
