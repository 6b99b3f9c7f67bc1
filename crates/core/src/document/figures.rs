//! Computed values handed to the document renderer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sppd_shared::types::{AssignmentId, TravelerId, format_rupiah};

use super::words::{spell_number, spell_rupiah};
use crate::travel::{Assignment, AssignmentCostAggregator, CostBreakdown, Traveler};

/// Figures for one traveler's receipt and cost detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelerFigures {
    /// Traveler ID.
    pub traveler_id: TravelerId,
    /// Traveler name, when the traveler is on the roster.
    pub name: Option<String>,
    /// Cost sub-totals.
    pub breakdown: CostBreakdown,
    /// Line total with digit grouping.
    pub total_formatted: String,
    /// Line total in words.
    pub total_in_words: String,
}

/// Figures for all documents of one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFigures {
    /// Assignment ID.
    pub assignment_id: AssignmentId,
    /// Trip length in days.
    pub duration_days: u32,
    /// Trip length in words.
    pub duration_in_words: String,
    /// Per-traveler figures, in selection order.
    pub travelers: Vec<TravelerFigures>,
    /// Sum over all travelers.
    pub grand_total: Decimal,
    /// Grand total with digit grouping.
    pub grand_total_formatted: String,
    /// Grand total in words.
    pub grand_total_in_words: String,
}

impl DocumentFigures {
    /// Computes document figures for an assignment.
    ///
    /// `roster` supplies traveler names; travelers missing from it are
    /// still priced.
    #[must_use]
    pub fn for_assignment(assignment: &Assignment, roster: &[Traveler]) -> Self {
        let travelers = assignment
            .cost_lines
            .iter()
            .map(|line| {
                let breakdown = AssignmentCostAggregator::breakdown(line);
                TravelerFigures {
                    traveler_id: line.traveler_id,
                    name: roster
                        .iter()
                        .find(|t| t.id == line.traveler_id)
                        .map(|t| t.name.clone()),
                    total_formatted: format_rupiah(breakdown.total),
                    total_in_words: spell_rupiah(breakdown.total),
                    breakdown,
                }
            })
            .collect();
        let grand_total = AssignmentCostAggregator::assignment_total(assignment);

        Self {
            assignment_id: assignment.id,
            duration_days: assignment.duration_days,
            duration_in_words: spell_number(u128::from(assignment.duration_days)),
            travelers,
            grand_total,
            grand_total_formatted: format_rupiah(grand_total),
            grand_total_in_words: spell_rupiah(grand_total),
        }
    }
}
