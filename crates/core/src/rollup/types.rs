//! Rollup data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sitecost_shared::types::{BillId, BudgetLineId, ContractId, InvoiceId};

/// The slice of a contract the rollup needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    /// Contract ID.
    pub id: ContractId,
    /// Contract value.
    pub contract_value: Decimal,
}

/// The slice of a client invoice the rollup needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Invoice ID.
    pub id: InvoiceId,
    /// Invoice amount.
    pub amount: Decimal,
}

/// The slice of a vendor bill the rollup needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillRecord {
    /// Bill ID.
    pub id: BillId,
    /// Bill amount.
    pub amount: Decimal,
    /// Remaining balance due.
    pub balance_due: Decimal,
}

/// The tracked amounts of a budget line the rollup needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLineTotals {
    /// Budget line ID.
    pub id: BudgetLineId,
    /// Estimated amount.
    pub estimated_amount: Decimal,
    /// Committed amount.
    pub committed_amount: Decimal,
    /// Actual amount.
    pub actual_amount: Decimal,
}

/// Whether the company is under or over budget overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetDirection {
    /// Total variance is non-negative.
    Under,
    /// Total variance is negative.
    Over,
}

impl BudgetDirection {
    /// Returns the string representation of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Under => "under",
            Self::Over => "over",
        }
    }
}

impl std::fmt::Display for BudgetDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Company-wide financial KPIs.
///
/// Every sum defaults to zero over an empty record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialKpis {
    /// Total value of non-voided contracts.
    pub total_contract_value: Decimal,
    /// Total of all invoices.
    pub total_invoiced: Decimal,
    /// Total of paid invoices.
    pub total_paid: Decimal,
    /// Total of outstanding-status invoices (accounts receivable).
    pub outstanding_receivables: Decimal,
    /// Total balance due on open bills (accounts payable).
    pub payables_balance: Decimal,
    /// Total estimated across live budget lines.
    pub total_estimated: Decimal,
    /// Total committed across live budget lines.
    pub total_committed: Decimal,
    /// Total actual across live budget lines.
    pub total_actual: Decimal,
    /// Company-wide variance: `total_estimated - total_actual`.
    pub total_variance: Decimal,
    /// Direction label derived from the variance sign.
    pub budget_direction: BudgetDirection,
}
