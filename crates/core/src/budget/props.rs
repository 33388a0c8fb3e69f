//! Property-based tests for budget-line reconciliation.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use sitecost_shared::types::{BudgetLineId, CompanyId, CostCodeId, FieldPatch, JobId};

use super::reconciler::Reconciler;
use super::types::{BudgetLine, ReconcileInput};

/// Strategy to generate non-negative decimal amounts up to $10B with cents.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate an amount patch: absent, null, or a value.
fn amount_patch() -> impl Strategy<Value = FieldPatch<Decimal>> {
    prop_oneof![
        Just(FieldPatch::Unchanged),
        Just(FieldPatch::Cleared),
        amount().prop_map(FieldPatch::Set),
    ]
}

fn stored_line(estimated: Decimal, committed: Decimal, actual: Decimal) -> BudgetLine {
    BudgetLine {
        id: BudgetLineId::new(),
        company_id: CompanyId::new(),
        job_id: JobId::new(),
        cost_code_id: Some(CostCodeId::new()),
        description: "06-100 Rough carpentry".to_string(),
        phase: None,
        notes: None,
        estimated_amount: estimated,
        committed_amount: committed,
        actual_amount: actual,
        projected_amount: estimated,
        variance_amount: estimated - actual,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10_000))]

    /// After every reconcile, `variance_amount == estimated_amount - actual_amount`
    /// holds with exact decimal equality.
    #[test]
    fn prop_variance_identity(
        stored_estimated in amount(),
        stored_committed in amount(),
        stored_actual in amount(),
        estimated in amount_patch(),
        committed in amount_patch(),
        actual in amount_patch(),
    ) {
        let stored = stored_line(stored_estimated, stored_committed, stored_actual);
        let input = ReconcileInput {
            estimated_amount: estimated,
            committed_amount: committed,
            actual_amount: actual,
            ..ReconcileInput::default()
        };

        let result = Reconciler::reconcile(&stored, input).unwrap();
        prop_assert_eq!(
            result.variance_amount,
            result.estimated_amount - result.actual_amount
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1_000))]

    /// Reconcile is idempotent: the same input against the same stored line
    /// yields an identical record.
    #[test]
    fn prop_reconcile_is_idempotent(
        stored_estimated in amount(),
        stored_actual in amount(),
        estimated in amount_patch(),
        actual in amount_patch(),
    ) {
        let stored = stored_line(stored_estimated, Decimal::ZERO, stored_actual);
        let input = ReconcileInput {
            estimated_amount: estimated,
            actual_amount: actual,
            ..ReconcileInput::default()
        };

        let first = Reconciler::reconcile(&stored, input.clone()).unwrap();
        let second = Reconciler::reconcile(&stored, input).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Any patch that would drive a tracked amount negative is rejected.
    #[test]
    fn prop_negative_amount_rejected(
        stored_estimated in amount(),
        negative_cents in 1i64..1_000_000_000_000,
        field in 0usize..3,
    ) {
        let stored = stored_line(stored_estimated, Decimal::ZERO, Decimal::ZERO);
        let negative = FieldPatch::Set(Decimal::new(-negative_cents, 2));
        let mut input = ReconcileInput::default();
        match field {
            0 => input.estimated_amount = negative,
            1 => input.committed_amount = negative,
            _ => input.actual_amount = negative,
        }

        prop_assert!(Reconciler::reconcile(&stored, input).is_err());
    }

    /// Reconcile never touches `projected_amount` unless the patch does.
    #[test]
    fn prop_projected_never_recomputed(
        stored_estimated in amount(),
        stored_actual in amount(),
        actual in amount_patch(),
    ) {
        let stored = stored_line(stored_estimated, Decimal::ZERO, stored_actual);
        let input = ReconcileInput {
            actual_amount: actual,
            ..ReconcileInput::default()
        };

        let result = Reconciler::reconcile(&stored, input).unwrap();
        prop_assert_eq!(result.projected_amount, stored.projected_amount);
    }
}
