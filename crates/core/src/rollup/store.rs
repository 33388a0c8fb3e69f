//! Ledger record store abstraction.
//!
//! The store is an external collaborator; this trait is the read contract
//! the rollup needs. Every read is tenant-scoped and excludes soft-deleted
//! rows. Implementations live in the db crate (SeaORM) and in test fakes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use sitecost_shared::types::TenantContext;

use super::types::{BillRecord, BudgetLineTotals, ContractRecord, InvoiceRecord};

/// Errors surfaced by the ledger record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying store failed to execute a read.
    #[error("record store error: {0}")]
    Backend(String),
}

/// Tenant-scoped reads over the ledger record store.
///
/// The fetches are logically independent; callers may issue them
/// concurrently and must not assume a consistent snapshot across them.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Non-voided contracts, optionally limited to those starting on or
    /// before `as_of`.
    async fn active_contracts(
        &self,
        ctx: &TenantContext,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Vec<ContractRecord>, StoreError>;

    /// All invoices regardless of status.
    async fn invoices(
        &self,
        ctx: &TenantContext,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Vec<InvoiceRecord>, StoreError>;

    /// Invoices in the paid status.
    async fn paid_invoices(
        &self,
        ctx: &TenantContext,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Vec<InvoiceRecord>, StoreError>;

    /// Invoices in an outstanding status (approved, in a draw, or pending
    /// one of the approval desks).
    async fn outstanding_invoices(
        &self,
        ctx: &TenantContext,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Vec<InvoiceRecord>, StoreError>;

    /// Bills that are neither paid nor voided.
    async fn open_bills(
        &self,
        ctx: &TenantContext,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Vec<BillRecord>, StoreError>;

    /// Live (non-archived) budget lines.
    async fn budget_lines(&self, ctx: &TenantContext) -> Result<Vec<BudgetLineTotals>, StoreError>;
}
