//! Budget-line data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sitecost_shared::types::{BudgetLineId, CompanyId, CostCodeId, FieldPatch, JobId};

/// A single cost-code-scoped row in a job's budget.
///
/// The three tracked amounts (estimated, committed, actual) are non-negative;
/// `variance_amount` is the signed difference `estimated - actual` and is
/// recomputed on every reconcile. `projected_amount` is supplied by the
/// estimate-to-complete process upstream and is only persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    /// Budget line ID.
    pub id: BudgetLineId,
    /// Owning company (tenant).
    pub company_id: CompanyId,
    /// Job this line budgets for.
    pub job_id: JobId,
    /// Optional cost code reference.
    pub cost_code_id: Option<CostCodeId>,
    /// Line description (required, non-blank).
    pub description: String,
    /// Construction phase label.
    pub phase: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Estimated amount.
    pub estimated_amount: Decimal,
    /// Committed amount (open purchase orders and subcontracts).
    pub committed_amount: Decimal,
    /// Actual amount spent to date.
    pub actual_amount: Decimal,
    /// Projected final amount, supplied upstream.
    pub projected_amount: Decimal,
    /// Signed variance: `estimated_amount - actual_amount`.
    pub variance_amount: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Which tracked amount a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountField {
    /// The estimated amount.
    Estimated,
    /// The committed amount.
    Committed,
    /// The actual amount.
    Actual,
}

impl AmountField {
    /// Returns the string representation of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Estimated => "estimated_amount",
            Self::Committed => "committed_amount",
            Self::Actual => "actual_amount",
        }
    }
}

impl std::fmt::Display for AmountField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Partial-edit input for a budget line.
///
/// Every field is a three-state patch: absent leaves the stored value,
/// `null` clears (amounts reset to zero, optional text to `None`), a value
/// replaces.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReconcileInput {
    /// Line description.
    #[serde(default)]
    pub description: FieldPatch<String>,
    /// Construction phase label.
    #[serde(default)]
    pub phase: FieldPatch<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: FieldPatch<String>,
    /// Estimated amount.
    #[serde(default)]
    pub estimated_amount: FieldPatch<Decimal>,
    /// Committed amount.
    #[serde(default)]
    pub committed_amount: FieldPatch<Decimal>,
    /// Actual amount.
    #[serde(default)]
    pub actual_amount: FieldPatch<Decimal>,
    /// Projected final amount (supplied upstream, persisted as-is).
    #[serde(default)]
    pub projected_amount: FieldPatch<Decimal>,
}

/// Counts of open records still referencing a budget line.
///
/// A line with any open commitment cannot be archived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenCommitments {
    /// Non-terminal change orders targeting the line.
    pub open_change_orders: u64,
    /// Unpaid, non-voided bills coded to the line.
    pub unpaid_bills: u64,
    /// Outstanding invoices on the line's job.
    pub outstanding_invoices: u64,
}

impl OpenCommitments {
    /// Returns true if any open commitment references the line.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.open_change_orders > 0 || self.unpaid_bills > 0 || self.outstanding_invoices > 0
    }
}
