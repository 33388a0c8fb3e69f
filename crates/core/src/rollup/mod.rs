//! Company-wide financial KPI aggregation.
//!
//! The aggregator issues independent tenant-scoped fetches against the
//! ledger record store and folds them into dashboard KPIs. The fetches are
//! deliberately unsynchronized (freshness over snapshot consistency); a
//! failure in any one fetch fails the whole aggregation so partial totals
//! are never presented as authoritative.

pub mod aggregator;
pub mod error;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod props;

pub use aggregator::Aggregator;
pub use error::RollupError;
pub use service::RollupService;
pub use store::{LedgerStore, StoreError};
pub use types::{
    BillRecord, BudgetDirection, BudgetLineTotals, ContractRecord, FinancialKpis, InvoiceRecord,
};
