//! Rollup repository: the SeaORM implementation of the ledger record store.
//!
//! Each read is an independent tenant-scoped query; callers issue them
//! concurrently and tolerate the lack of a shared snapshot.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use sitecost_core::rollup::{
    BillRecord, BudgetLineTotals, ContractRecord, InvoiceRecord, LedgerStore, StoreError,
};
use sitecost_shared::types::{BillId, BudgetLineId, ContractId, InvoiceId, TenantContext};

use crate::entities::{
    bills, budget_lines, contracts, invoices,
    sea_orm_active_enums::{ContractStatus, InvoiceStatus},
};

use super::budget_line::{OUTSTANDING_INVOICE_STATUSES, UNPAID_BILL_STATUSES};

/// SeaORM-backed ledger record store.
#[derive(Debug, Clone)]
pub struct RollupRepository {
    db: DatabaseConnection,
}

impl RollupRepository {
    /// Creates a new rollup repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn invoice_query(
        ctx: &TenantContext,
        as_of: Option<DateTime<Utc>>,
    ) -> sea_orm::Select<invoices::Entity> {
        let mut query = invoices::Entity::find()
            .filter(invoices::Column::CompanyId.eq(ctx.company_id.into_inner()))
            .filter(invoices::Column::DeletedAt.is_null());
        if let Some(as_of) = as_of {
            query = query.filter(invoices::Column::IssuedOn.lte(as_of.date_naive()));
        }
        query
    }
}

fn to_store_err(e: DbErr) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn invoice_records(models: Vec<invoices::Model>) -> Vec<InvoiceRecord> {
    models
        .into_iter()
        .map(|m| InvoiceRecord {
            id: InvoiceId::from_uuid(m.id),
            amount: m.amount,
        })
        .collect()
}

#[async_trait]
impl LedgerStore for RollupRepository {
    async fn active_contracts(
        &self,
        ctx: &TenantContext,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Vec<ContractRecord>, StoreError> {
        let mut query = contracts::Entity::find()
            .filter(contracts::Column::CompanyId.eq(ctx.company_id.into_inner()))
            .filter(contracts::Column::DeletedAt.is_null())
            .filter(contracts::Column::Status.ne(ContractStatus::Voided));
        if let Some(as_of) = as_of {
            query = query.filter(contracts::Column::StartDate.lte(as_of.date_naive()));
        }

        let models = query.all(&self.db).await.map_err(to_store_err)?;
        Ok(models
            .into_iter()
            .map(|m| ContractRecord {
                id: ContractId::from_uuid(m.id),
                contract_value: m.contract_value,
            })
            .collect())
    }

    async fn invoices(
        &self,
        ctx: &TenantContext,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Vec<InvoiceRecord>, StoreError> {
        let models = Self::invoice_query(ctx, as_of)
            .all(&self.db)
            .await
            .map_err(to_store_err)?;
        Ok(invoice_records(models))
    }

    async fn paid_invoices(
        &self,
        ctx: &TenantContext,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Vec<InvoiceRecord>, StoreError> {
        let models = Self::invoice_query(ctx, as_of)
            .filter(invoices::Column::Status.eq(InvoiceStatus::Paid))
            .all(&self.db)
            .await
            .map_err(to_store_err)?;
        Ok(invoice_records(models))
    }

    async fn outstanding_invoices(
        &self,
        ctx: &TenantContext,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Vec<InvoiceRecord>, StoreError> {
        let models = Self::invoice_query(ctx, as_of)
            .filter(invoices::Column::Status.is_in(OUTSTANDING_INVOICE_STATUSES))
            .all(&self.db)
            .await
            .map_err(to_store_err)?;
        Ok(invoice_records(models))
    }

    async fn open_bills(
        &self,
        ctx: &TenantContext,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Vec<BillRecord>, StoreError> {
        let mut query = bills::Entity::find()
            .filter(bills::Column::CompanyId.eq(ctx.company_id.into_inner()))
            .filter(bills::Column::DeletedAt.is_null())
            .filter(bills::Column::Status.is_in(UNPAID_BILL_STATUSES));
        if let Some(as_of) = as_of {
            query = query.filter(bills::Column::IssuedOn.lte(as_of.date_naive()));
        }

        let models = query.all(&self.db).await.map_err(to_store_err)?;
        Ok(models
            .into_iter()
            .map(|m| BillRecord {
                id: BillId::from_uuid(m.id),
                amount: m.amount,
                balance_due: m.balance_due,
            })
            .collect())
    }

    async fn budget_lines(&self, ctx: &TenantContext) -> Result<Vec<BudgetLineTotals>, StoreError> {
        let models = budget_lines::Entity::find()
            .filter(budget_lines::Column::CompanyId.eq(ctx.company_id.into_inner()))
            .filter(budget_lines::Column::DeletedAt.is_null())
            .all(&self.db)
            .await
            .map_err(to_store_err)?;
        Ok(models
            .into_iter()
            .map(|m| BudgetLineTotals {
                id: BudgetLineId::from_uuid(m.id),
                estimated_amount: m.estimated_amount,
                committed_amount: m.committed_amount,
                actual_amount: m.actual_amount,
            })
            .collect())
    }
}
