//! Property-based tests for KPI folds.

use proptest::prelude::*;
use rust_decimal::Decimal;

use sitecost_shared::types::{BudgetLineId, InvoiceId};

use super::aggregator::Aggregator;
use super::types::{BudgetDirection, BudgetLineTotals, InvoiceRecord};

/// Strategy to generate invoice amounts with cents.
fn invoice_amounts() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(
        (0i64..10_000_000_000).prop_map(|cents| Decimal::new(cents, 2)),
        0..200,
    )
}

fn invoices_from(amounts: &[Decimal]) -> Vec<InvoiceRecord> {
    amounts
        .iter()
        .map(|amount| InvoiceRecord {
            id: InvoiceId::new(),
            amount: *amount,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Summing the same multiset of invoices in any permutation yields the
    /// same total.
    #[test]
    fn prop_invoice_sum_is_order_independent(
        (original, shuffled) in invoice_amounts()
            .prop_flat_map(|amounts| {
                let original = amounts.clone();
                Just(amounts).prop_shuffle().prop_map(move |s| (original.clone(), s))
            }),
    ) {
        let a = Aggregator::total_invoice_amount(&invoices_from(&original));
        let b = Aggregator::total_invoice_amount(&invoices_from(&shuffled));
        prop_assert_eq!(a, b);
    }

    /// Splitting a record set arbitrarily and summing the parts matches the
    /// whole (associativity of the fold).
    #[test]
    fn prop_invoice_sum_is_associative(
        amounts in invoice_amounts(),
        split in any::<prop::sample::Index>(),
    ) {
        let invoices = invoices_from(&amounts);
        let at = if invoices.is_empty() { 0 } else { split.index(invoices.len()) };
        let (left, right) = invoices.split_at(at);

        let whole = Aggregator::total_invoice_amount(&invoices);
        let parts = Aggregator::total_invoice_amount(left)
            + Aggregator::total_invoice_amount(right);
        prop_assert_eq!(whole, parts);
    }

    /// The company-wide variance always equals the sum of estimated minus
    /// the sum of actual, and the direction label matches its sign.
    #[test]
    fn prop_total_variance_matches_direction(
        rows in prop::collection::vec(
            (
                (0i64..10_000_000_000).prop_map(|c| Decimal::new(c, 2)),
                (0i64..10_000_000_000).prop_map(|c| Decimal::new(c, 2)),
            ),
            0..100,
        ),
    ) {
        let lines: Vec<BudgetLineTotals> = rows
            .iter()
            .map(|(estimated, actual)| BudgetLineTotals {
                id: BudgetLineId::new(),
                estimated_amount: *estimated,
                committed_amount: Decimal::ZERO,
                actual_amount: *actual,
            })
            .collect();

        let kpis = Aggregator::build_kpis(&[], &[], &[], &[], &[], &lines);
        prop_assert_eq!(
            kpis.total_variance,
            Aggregator::total_estimated(&lines) - Aggregator::total_actual(&lines)
        );

        if kpis.total_variance >= Decimal::ZERO {
            prop_assert_eq!(kpis.budget_direction, BudgetDirection::Under);
        } else {
            prop_assert_eq!(kpis.budget_direction, BudgetDirection::Over);
        }
    }
}
