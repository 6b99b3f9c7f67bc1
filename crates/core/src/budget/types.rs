//! Budget line and reconciliation data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sppd_shared::types::parse_amount;

/// A spending category charged by travel assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    /// Sub-activity code (unique key).
    pub code: String,
    /// Sub-activity name.
    pub name: String,
    /// Nominal budget ceiling.
    pub budget_ceiling: Decimal,
    /// Disbursement (SPD) ceiling as entered; parsed on use.
    pub disbursement_ceiling: String,
    /// First quarter allocation.
    pub q1: Decimal,
    /// Second quarter allocation.
    pub q2: Decimal,
    /// Third quarter allocation.
    pub q3: Decimal,
    /// Fourth quarter allocation.
    pub q4: Decimal,
}

impl BudgetLine {
    /// Creates a line with the given ceiling and no disbursement ceiling or allocations.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, budget_ceiling: Decimal) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            budget_ceiling,
            disbursement_ceiling: String::new(),
            q1: Decimal::ZERO,
            q2: Decimal::ZERO,
            q3: Decimal::ZERO,
            q4: Decimal::ZERO,
        }
    }

    /// Disbursement ceiling as an amount; blank or unparsable text is zero.
    #[must_use]
    pub fn disbursement_ceiling_amount(&self) -> Decimal {
        parse_amount(&self.disbursement_ceiling)
    }

    /// Quarterly allocations paired with their names.
    #[must_use]
    pub const fn quarters(&self) -> [(&'static str, Decimal); 4] {
        [
            ("q1", self.q1),
            ("q2", self.q2),
            ("q3", self.q3),
            ("q4", self.q4),
        ]
    }
}

/// Realization of one funded budget line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLineReconciliation {
    /// Sub-activity code.
    pub code: String,
    /// Sub-activity name.
    pub name: String,
    /// Nominal budget ceiling.
    pub budget_ceiling: Decimal,
    /// Parsed disbursement ceiling.
    pub disbursement_ceiling: Decimal,
    /// Sum of assignment totals charged to this line.
    pub realized: Decimal,
    /// Disbursement ceiling minus realized; negative when over-realized.
    pub remaining_disbursement: Decimal,
    /// Budget ceiling minus realized; negative when over-realized.
    pub remaining_budget: Decimal,
    /// Realized / budget ceiling * 100, rounded to 2 places.
    pub utilization_percent: Decimal,
    /// Realized exceeds the budget ceiling.
    pub is_over_budget: bool,
    /// Realized exceeds the disbursement ceiling.
    pub is_over_disbursement: bool,
}

/// Sums over all reported lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationTotals {
    /// Total budget ceiling.
    pub budget_ceiling: Decimal,
    /// Total disbursement ceiling.
    pub disbursement_ceiling: Decimal,
    /// Total realized.
    pub realized: Decimal,
    /// Total remaining disbursement.
    pub remaining_disbursement: Decimal,
    /// Total remaining budget.
    pub remaining_budget: Decimal,
}

/// Budget realization report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// One entry per funded budget line, in input order.
    pub lines: Vec<BudgetLineReconciliation>,
    /// Global totals.
    pub totals: ReconciliationTotals,
}

impl ReconciliationReport {
    /// Report line for a budget code.
    #[must_use]
    pub fn line(&self, code: &str) -> Option<&BudgetLineReconciliation> {
        self.lines.iter().find(|l| l.code == code)
    }
}
