//! Budget error types.

use rust_decimal::Decimal;
use thiserror::Error;

use sitecost_shared::types::BudgetLineId;

use super::types::AmountField;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// A tracked amount would become negative.
    #[error("Budget line {field} cannot be negative: {amount}")]
    NegativeAmount {
        /// The offending field.
        field: AmountField,
        /// The resolved value that was rejected.
        amount: Decimal,
    },

    /// Description resolved to empty or whitespace.
    #[error("Budget line description is required")]
    DescriptionRequired,

    /// Archive blocked by open commitments.
    #[error(
        "Budget line has open commitments: {open_change_orders} change orders, \
         {unpaid_bills} bills, {outstanding_invoices} invoices"
    )]
    OpenCommitments {
        /// Non-terminal change orders targeting the line.
        open_change_orders: u64,
        /// Unpaid, non-voided bills coded to the line.
        unpaid_bills: u64,
        /// Outstanding invoices on the line's job.
        outstanding_invoices: u64,
    },

    /// Budget line not found in the tenant's ledger.
    #[error("Budget line not found: {0}")]
    NotFound(BudgetLineId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl BudgetError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NegativeAmount { .. } | Self::DescriptionRequired => 400,
            Self::OpenCommitments { .. } => 409,
            Self::NotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::DescriptionRequired => "DESCRIPTION_REQUIRED",
            Self::OpenCommitments { .. } => "OPEN_COMMITMENTS",
            Self::NotFound(_) => "BUDGET_LINE_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
