//! Cost totals for cost lines and assignments.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sppd_shared::types::TravelerId;

use super::types::{Assignment, CostLine};

/// Sub-totals of one cost line as printed on receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Daily allowance times days.
    pub daily: Decimal,
    /// Lodging rate times nights.
    pub lodging: Decimal,
    /// Fuel, sea, air and local transport combined.
    pub transport: Decimal,
    /// Representation rate times days.
    pub representation: Decimal,
    /// Sum of the above.
    pub total: Decimal,
}

/// Sums cost lines.
pub struct AssignmentCostAggregator;

impl AssignmentCostAggregator {
    /// Total cost of one cost line.
    #[must_use]
    pub fn line_total(line: &CostLine) -> Decimal {
        Self::breakdown(line).total
    }

    /// Total cost of an assignment across all its cost lines.
    #[must_use]
    pub fn assignment_total(assignment: &Assignment) -> Decimal {
        assignment.cost_lines.iter().map(Self::line_total).sum()
    }

    /// Sub-totals of one cost line.
    #[must_use]
    pub fn breakdown(line: &CostLine) -> CostBreakdown {
        let daily = line.daily_allowance * Decimal::from(line.daily_days);
        let lodging = line.lodging * Decimal::from(line.lodging_days);
        let transport =
            line.fuel_transport + line.sea_transport + line.air_transport + line.local_transport;
        let representation = line.representation * Decimal::from(line.representation_days);

        CostBreakdown {
            daily,
            lodging,
            transport,
            representation,
            total: daily + lodging + transport + representation,
        }
    }

    /// Amount received by one traveler, if they are on the assignment.
    #[must_use]
    pub fn traveler_total(assignment: &Assignment, traveler_id: TravelerId) -> Option<Decimal> {
        assignment.cost_line(traveler_id).map(Self::line_total)
    }
}
