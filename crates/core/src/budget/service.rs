//! Budget reconciliation against realized travel costs.

use rust_decimal::Decimal;
use sppd_shared::types::fits_amount_scale;

use super::error::BudgetError;
use super::types::{BudgetLine, BudgetLineReconciliation, ReconciliationReport, ReconciliationTotals};
use crate::integrity::{ReferenceKind, ReferentialIntegrityError, ensure_unreferenced, references};
use crate::travel::{Assignment, AssignmentCostAggregator};

/// Folds assignment totals against budget line ceilings.
///
/// Stateless: every figure is recomputed from the snapshot passed in.
pub struct BudgetReconciler;

impl BudgetReconciler {
    /// Realized spending on a budget line across every assignment, regardless of date.
    #[must_use]
    pub fn realize(code: &str, assignments: &[Assignment]) -> Decimal {
        assignments
            .iter()
            .filter(|a| a.budget_line_code == code)
            .map(AssignmentCostAggregator::assignment_total)
            .sum()
    }

    /// Reconciles one budget line.
    #[must_use]
    pub fn reconcile_line(line: &BudgetLine, assignments: &[Assignment]) -> BudgetLineReconciliation {
        let realized = Self::realize(&line.code, assignments);
        let disbursement_ceiling = line.disbursement_ceiling_amount();

        BudgetLineReconciliation {
            code: line.code.clone(),
            name: line.name.clone(),
            budget_ceiling: line.budget_ceiling,
            disbursement_ceiling,
            realized,
            remaining_disbursement: disbursement_ceiling - realized,
            remaining_budget: line.budget_ceiling - realized,
            utilization_percent: Self::utilization_percent(realized, line.budget_ceiling),
            is_over_budget: realized > line.budget_ceiling,
            is_over_disbursement: realized > disbursement_ceiling,
        }
    }

    /// Builds the realization report.
    ///
    /// Lines with a ceiling of zero or less are unfunded and left out, and so
    /// are the assignments charged to them. Remaining figures may go negative;
    /// over-realization is reported, never prevented.
    #[must_use]
    pub fn reconcile(budget_lines: &[BudgetLine], assignments: &[Assignment]) -> ReconciliationReport {
        let lines: Vec<BudgetLineReconciliation> = budget_lines
            .iter()
            .filter(|line| line.budget_ceiling > Decimal::ZERO)
            .map(|line| Self::reconcile_line(line, assignments))
            .collect();

        let totals = lines
            .iter()
            .fold(ReconciliationTotals::default(), |acc, line| ReconciliationTotals {
                budget_ceiling: acc.budget_ceiling + line.budget_ceiling,
                disbursement_ceiling: acc.disbursement_ceiling + line.disbursement_ceiling,
                realized: acc.realized + line.realized,
                remaining_disbursement: acc.remaining_disbursement + line.remaining_disbursement,
                remaining_budget: acc.remaining_budget + line.remaining_budget,
            });

        ReconciliationReport { lines, totals }
    }

    /// Utilization percentage, zero for a zero ceiling.
    #[must_use]
    pub fn utilization_percent(realized: Decimal, ceiling: Decimal) -> Decimal {
        if ceiling.is_zero() {
            Decimal::ZERO
        } else {
            (realized / ceiling * Decimal::ONE_HUNDRED).round_dp(2)
        }
    }

    /// Whether a budget line can be deleted (no assignment charges it).
    #[must_use]
    pub fn can_delete(code: &str, assignments: &[Assignment]) -> bool {
        references(ReferenceKind::BudgetLine, code, assignments) == 0
    }

    /// Refuses deletion of a budget line still charged by assignments.
    ///
    /// # Errors
    ///
    /// Returns `ReferentialIntegrityError` naming the code and the number of
    /// referencing assignments.
    pub fn ensure_deletable(
        code: &str,
        assignments: &[Assignment],
    ) -> Result<(), ReferentialIntegrityError> {
        ensure_unreferenced(ReferenceKind::BudgetLine, code, assignments)
    }

    /// Validates a budget line before it is saved.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::EmptyCode` for a blank code and
    /// `BudgetError::NegativeAmount` for a negative ceiling or allocation, and
    /// `BudgetError::TooPrecise` for one with more than two decimal places.
    pub fn validate_budget_line(line: &BudgetLine) -> Result<(), BudgetError> {
        if line.code.trim().is_empty() {
            return Err(BudgetError::EmptyCode);
        }

        let amounts = [
            ("budget_ceiling", line.budget_ceiling),
            ("disbursement_ceiling", line.disbursement_ceiling_amount()),
        ]
        .into_iter()
        .chain(line.quarters());

        for (field, amount) in amounts {
            if amount < Decimal::ZERO {
                return Err(BudgetError::NegativeAmount {
                    code: line.code.clone(),
                    field,
                });
            }
            if !fits_amount_scale(amount) {
                return Err(BudgetError::TooPrecise {
                    code: line.code.clone(),
                    field,
                });
            }
        }

        Ok(())
    }
}
