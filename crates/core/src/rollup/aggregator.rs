//! Pure KPI folds.
//!
//! Every function here is a fold over an already-fetched record set:
//! decimal addition over a multiset, so totals are exact and independent of
//! record order. Empty sets sum to zero.

use rust_decimal::Decimal;

use super::types::{
    BillRecord, BudgetDirection, BudgetLineTotals, ContractRecord, FinancialKpis, InvoiceRecord,
};

/// Stateless KPI aggregator.
pub struct Aggregator;

impl Aggregator {
    /// Sum of contract values.
    #[must_use]
    pub fn total_contract_value(contracts: &[ContractRecord]) -> Decimal {
        contracts.iter().map(|c| c.contract_value).sum()
    }

    /// Sum of invoice amounts.
    #[must_use]
    pub fn total_invoice_amount(invoices: &[InvoiceRecord]) -> Decimal {
        invoices.iter().map(|i| i.amount).sum()
    }

    /// Sum of open-bill balances due.
    #[must_use]
    pub fn payables_balance(bills: &[BillRecord]) -> Decimal {
        bills.iter().map(|b| b.balance_due).sum()
    }

    /// Sum of budget-line estimated amounts.
    #[must_use]
    pub fn total_estimated(lines: &[BudgetLineTotals]) -> Decimal {
        lines.iter().map(|l| l.estimated_amount).sum()
    }

    /// Sum of budget-line committed amounts.
    #[must_use]
    pub fn total_committed(lines: &[BudgetLineTotals]) -> Decimal {
        lines.iter().map(|l| l.committed_amount).sum()
    }

    /// Sum of budget-line actual amounts.
    #[must_use]
    pub fn total_actual(lines: &[BudgetLineTotals]) -> Decimal {
        lines.iter().map(|l| l.actual_amount).sum()
    }

    /// Folds the six record sets into the KPI response.
    #[must_use]
    pub fn build_kpis(
        contracts: &[ContractRecord],
        invoices: &[InvoiceRecord],
        paid: &[InvoiceRecord],
        outstanding: &[InvoiceRecord],
        bills: &[BillRecord],
        lines: &[BudgetLineTotals],
    ) -> FinancialKpis {
        let total_estimated = Self::total_estimated(lines);
        let total_actual = Self::total_actual(lines);
        let total_variance = total_estimated - total_actual;

        let budget_direction = if total_variance >= Decimal::ZERO {
            BudgetDirection::Under
        } else {
            BudgetDirection::Over
        };

        FinancialKpis {
            total_contract_value: Self::total_contract_value(contracts),
            total_invoiced: Self::total_invoice_amount(invoices),
            total_paid: Self::total_invoice_amount(paid),
            outstanding_receivables: Self::total_invoice_amount(outstanding),
            payables_balance: Self::payables_balance(bills),
            total_estimated,
            total_committed: Self::total_committed(lines),
            total_actual,
            total_variance,
            budget_direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use sitecost_shared::types::{BillId, BudgetLineId, ContractId, InvoiceId};

    use super::*;

    #[test]
    fn test_empty_sets_sum_to_zero() {
        let kpis = Aggregator::build_kpis(&[], &[], &[], &[], &[], &[]);

        assert_eq!(kpis.total_contract_value, Decimal::ZERO);
        assert_eq!(kpis.total_invoiced, Decimal::ZERO);
        assert_eq!(kpis.total_paid, Decimal::ZERO);
        assert_eq!(kpis.outstanding_receivables, Decimal::ZERO);
        assert_eq!(kpis.payables_balance, Decimal::ZERO);
        assert_eq!(kpis.total_estimated, Decimal::ZERO);
        assert_eq!(kpis.total_committed, Decimal::ZERO);
        assert_eq!(kpis.total_actual, Decimal::ZERO);
        assert_eq!(kpis.total_variance, Decimal::ZERO);
        assert_eq!(kpis.budget_direction, BudgetDirection::Under);
    }

    #[test]
    fn test_contract_values_sum() {
        let contracts = vec![
            ContractRecord {
                id: ContractId::new(),
                contract_value: dec!(2400000),
            },
            ContractRecord {
                id: ContractId::new(),
                contract_value: dec!(150000.50),
            },
        ];
        assert_eq!(
            Aggregator::total_contract_value(&contracts),
            dec!(2550000.50)
        );
    }

    #[test]
    fn test_payables_use_balance_due_not_amount() {
        let bills = vec![BillRecord {
            id: BillId::new(),
            amount: dec!(10000),
            balance_due: dec!(2500),
        }];
        assert_eq!(Aggregator::payables_balance(&bills), dec!(2500));
    }

    #[test]
    fn test_variance_and_direction() {
        let lines = vec![
            BudgetLineTotals {
                id: BudgetLineId::new(),
                estimated_amount: dec!(1000),
                committed_amount: dec!(400),
                actual_amount: dec!(700),
            },
            BudgetLineTotals {
                id: BudgetLineId::new(),
                estimated_amount: dec!(500),
                committed_amount: dec!(0),
                actual_amount: dec!(100),
            },
        ];
        let kpis = Aggregator::build_kpis(&[], &[], &[], &[], &[], &lines);

        assert_eq!(kpis.total_estimated, dec!(1500));
        assert_eq!(kpis.total_actual, dec!(800));
        assert_eq!(kpis.total_variance, dec!(700));
        assert_eq!(kpis.budget_direction, BudgetDirection::Under);
    }

    #[test]
    fn test_over_budget_direction() {
        let lines = vec![BudgetLineTotals {
            id: BudgetLineId::new(),
            estimated_amount: dec!(100),
            committed_amount: dec!(0),
            actual_amount: dec!(250),
        }];
        let kpis = Aggregator::build_kpis(&[], &[], &[], &[], &[], &lines);

        assert_eq!(kpis.total_variance, dec!(-150));
        assert_eq!(kpis.budget_direction, BudgetDirection::Over);
    }

    #[test]
    fn test_zero_variance_is_under() {
        let lines = vec![BudgetLineTotals {
            id: BudgetLineId::new(),
            estimated_amount: dec!(100),
            committed_amount: dec!(0),
            actual_amount: dec!(100),
        }];
        let kpis = Aggregator::build_kpis(&[], &[], &[], &[], &[], &lines);
        assert_eq!(kpis.budget_direction, BudgetDirection::Under);
    }

    #[test]
    fn test_invoice_buckets_are_independent() {
        let all = vec![
            InvoiceRecord {
                id: InvoiceId::new(),
                amount: dec!(100),
            },
            InvoiceRecord {
                id: InvoiceId::new(),
                amount: dec!(250),
            },
        ];
        let paid = vec![all[0].clone()];
        let outstanding = vec![all[1].clone()];

        let kpis = Aggregator::build_kpis(&[], &all, &paid, &outstanding, &[], &[]);
        assert_eq!(kpis.total_invoiced, dec!(350));
        assert_eq!(kpis.total_paid, dec!(100));
        assert_eq!(kpis.outstanding_receivables, dec!(250));
    }
}
