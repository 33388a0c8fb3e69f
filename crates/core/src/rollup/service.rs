//! Rollup orchestration over the ledger record store.

use chrono::{DateTime, Utc};

use sitecost_shared::types::TenantContext;

use super::aggregator::Aggregator;
use super::error::RollupError;
use super::store::LedgerStore;
use super::types::FinancialKpis;

/// Service that fetches the record sets and folds them into KPIs.
pub struct RollupService;

impl RollupService {
    /// Aggregates company-wide KPIs as of roughly now.
    ///
    /// The six fetches run concurrently with no snapshot barrier: the KPIs
    /// are "approximately as of now", not point-in-time consistent. That is
    /// the intended trade-off, freshness over consistency.
    ///
    /// # Errors
    ///
    /// Returns `RollupError::Store` if any single fetch fails; no partial
    /// KPI object is produced in that case.
    pub async fn aggregate<S>(
        store: &S,
        ctx: &TenantContext,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<FinancialKpis, RollupError>
    where
        S: LedgerStore + ?Sized,
    {
        let (contracts, invoices, paid, outstanding, bills, lines) = tokio::join!(
            store.active_contracts(ctx, as_of),
            store.invoices(ctx, as_of),
            store.paid_invoices(ctx, as_of),
            store.outstanding_invoices(ctx, as_of),
            store.open_bills(ctx, as_of),
            store.budget_lines(ctx),
        );

        Ok(Aggregator::build_kpis(
            &contracts?,
            &invoices?,
            &paid?,
            &outstanding?,
            &bills?,
            &lines?,
        ))
    }
}
