//! Budget-line reconciliation and archive guards.

pub mod error;
pub mod reconciler;
pub mod types;

#[cfg(test)]
mod props;

pub use error::BudgetError;
pub use reconciler::Reconciler;
pub use types::{AmountField, BudgetLine, OpenCommitments, ReconcileInput};
