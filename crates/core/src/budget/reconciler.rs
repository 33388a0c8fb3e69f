//! Budget-line reconciliation.
//!
//! Resolves a partial edit against the stored line, validates the three
//! tracked amounts, and recomputes the variance. Pure: no persistence, no
//! clock reads; the repository layer applies timestamps on write.

use rust_decimal::Decimal;

use sitecost_shared::types::FieldPatch;

use super::error::BudgetError;
use super::types::{AmountField, BudgetLine, OpenCommitments, ReconcileInput};

/// Stateless reconciler for budget-line edits.
pub struct Reconciler;

impl Reconciler {
    /// Signed variance of a budget line: positive means under budget.
    #[must_use]
    pub fn variance(estimated: Decimal, actual: Decimal) -> Decimal {
        estimated - actual
    }

    /// Resolves `input` against `stored` and returns the reconciled line.
    ///
    /// Amount fields reset to zero when cleared; optional text fields reset
    /// to `None`. `projected_amount` is persisted as resolved and never
    /// recomputed here. `variance_amount` is always recomputed as
    /// `estimated_amount - actual_amount`.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NegativeAmount` if any resolved tracked amount
    /// is negative, or `BudgetError::DescriptionRequired` if the resolved
    /// description is empty or whitespace.
    pub fn reconcile(stored: &BudgetLine, input: ReconcileInput) -> Result<BudgetLine, BudgetError> {
        let description = match input.description {
            FieldPatch::Unchanged => stored.description.clone(),
            FieldPatch::Cleared => String::new(),
            FieldPatch::Set(value) => value,
        };
        if description.trim().is_empty() {
            return Err(BudgetError::DescriptionRequired);
        }

        let estimated = input
            .estimated_amount
            .resolve_with(stored.estimated_amount, Decimal::ZERO);
        let committed = input
            .committed_amount
            .resolve_with(stored.committed_amount, Decimal::ZERO);
        let actual = input
            .actual_amount
            .resolve_with(stored.actual_amount, Decimal::ZERO);

        Self::check_non_negative(AmountField::Estimated, estimated)?;
        Self::check_non_negative(AmountField::Committed, committed)?;
        Self::check_non_negative(AmountField::Actual, actual)?;

        let projected = input
            .projected_amount
            .resolve_with(stored.projected_amount, Decimal::ZERO);

        Ok(BudgetLine {
            id: stored.id,
            company_id: stored.company_id,
            job_id: stored.job_id,
            cost_code_id: stored.cost_code_id,
            description,
            phase: resolve_optional(input.phase, &stored.phase),
            notes: resolve_optional(input.notes, &stored.notes),
            estimated_amount: estimated,
            committed_amount: committed,
            actual_amount: actual,
            projected_amount: projected,
            variance_amount: Self::variance(estimated, actual),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }

    /// Rejects archival while open commitments reference the line.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::OpenCommitments` when any count is nonzero.
    pub fn check_archivable(commitments: &OpenCommitments) -> Result<(), BudgetError> {
        if commitments.any() {
            return Err(BudgetError::OpenCommitments {
                open_change_orders: commitments.open_change_orders,
                unpaid_bills: commitments.unpaid_bills,
                outstanding_invoices: commitments.outstanding_invoices,
            });
        }
        Ok(())
    }

    fn check_non_negative(field: AmountField, amount: Decimal) -> Result<(), BudgetError> {
        if amount < Decimal::ZERO {
            return Err(BudgetError::NegativeAmount { field, amount });
        }
        Ok(())
    }
}

/// Resolves a text patch against an optional stored value.
fn resolve_optional(patch: FieldPatch<String>, stored: &Option<String>) -> Option<String> {
    match patch {
        FieldPatch::Unchanged => stored.clone(),
        FieldPatch::Cleared => None,
        FieldPatch::Set(value) => Some(value),
    }
}
