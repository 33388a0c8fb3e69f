//! Budget-line repository: fetch, reconcile-and-save, archive.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use sitecost_core::budget::{BudgetError, BudgetLine, OpenCommitments, ReconcileInput, Reconciler};
use sitecost_shared::types::{
    BudgetLineId, CompanyId, CostCodeId, JobId, TenantContext,
};

use crate::entities::{
    bills, budget_lines, change_orders, invoices,
    sea_orm_active_enums::{BillStatus, ChangeOrderStatus, InvoiceStatus},
};

/// Invoice statuses counted as outstanding receivables.
pub(crate) const OUTSTANDING_INVOICE_STATUSES: [InvoiceStatus; 5] = [
    InvoiceStatus::PmPending,
    InvoiceStatus::AccountantPending,
    InvoiceStatus::OwnerPending,
    InvoiceStatus::Approved,
    InvoiceStatus::InDraw,
];

/// Change-order statuses that still represent an open commitment.
pub(crate) const OPEN_CHANGE_ORDER_STATUSES: [ChangeOrderStatus; 4] = [
    ChangeOrderStatus::Draft,
    ChangeOrderStatus::InternalReview,
    ChangeOrderStatus::ClientPresented,
    ChangeOrderStatus::Negotiation,
];

/// Bill statuses with money still owed.
pub(crate) const UNPAID_BILL_STATUSES: [BillStatus; 2] = [BillStatus::Pending, BillStatus::Partial];

/// Budget-line repository.
#[derive(Debug, Clone)]
pub struct BudgetLineRepository {
    db: DatabaseConnection,
}

impl BudgetLineRepository {
    /// Creates a new budget-line repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches a live budget line in the caller's tenant.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if the line does not exist, belongs
    /// to another tenant, or is archived.
    pub async fn get(
        &self,
        ctx: &TenantContext,
        line_id: BudgetLineId,
    ) -> Result<BudgetLine, BudgetError> {
        let model = self.fetch(ctx, line_id).await?;
        Ok(model_to_domain(&model))
    }

    /// Reconciles a partial edit against the stored line and persists it.
    ///
    /// The math lives in `Reconciler::reconcile`; this method only loads,
    /// saves, and stamps `updated_at`. Concurrent edits are last-write-wins
    /// at the store; there is no version column to check.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from the reconciler, `NotFound` when
    /// the line is missing, and `Database` on store failure.
    pub async fn reconcile(
        &self,
        ctx: &TenantContext,
        line_id: BudgetLineId,
        input: ReconcileInput,
    ) -> Result<BudgetLine, BudgetError> {
        let model = self.fetch(ctx, line_id).await?;
        let stored = model_to_domain(&model);
        let reconciled = Reconciler::reconcile(&stored, input)?;

        let now = Utc::now().into();
        let mut active: budget_lines::ActiveModel = model.into();
        active.description = Set(reconciled.description.clone());
        active.phase = Set(reconciled.phase.clone());
        active.notes = Set(reconciled.notes.clone());
        active.estimated_amount = Set(reconciled.estimated_amount);
        active.committed_amount = Set(reconciled.committed_amount);
        active.actual_amount = Set(reconciled.actual_amount);
        active.projected_amount = Set(reconciled.projected_amount);
        active.variance_amount = Set(reconciled.variance_amount);
        active.updated_at = Set(now);

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?;

        Ok(model_to_domain(&updated))
    }

    /// Archives (soft-deletes) a budget line.
    ///
    /// Blocked while open commitments reference the line: non-terminal
    /// change orders targeting it, unpaid bills coded to it, or outstanding
    /// invoices on its job.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::OpenCommitments` when the line is still
    /// referenced, `NotFound` when missing, `Database` on store failure.
    pub async fn archive(
        &self,
        ctx: &TenantContext,
        line_id: BudgetLineId,
    ) -> Result<(), BudgetError> {
        let model = self.fetch(ctx, line_id).await?;

        let commitments = self.open_commitments(ctx, &model).await?;
        Reconciler::check_archivable(&commitments)?;

        let now = Utc::now().into();
        let mut active: budget_lines::ActiveModel = model.into();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);
        active
            .update(&self.db)
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?;

        Ok(())
    }

    async fn fetch(
        &self,
        ctx: &TenantContext,
        line_id: BudgetLineId,
    ) -> Result<budget_lines::Model, BudgetError> {
        budget_lines::Entity::find_by_id(line_id.into_inner())
            .filter(budget_lines::Column::CompanyId.eq(ctx.company_id.into_inner()))
            .filter(budget_lines::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?
            .ok_or(BudgetError::NotFound(line_id))
    }

    async fn open_commitments(
        &self,
        ctx: &TenantContext,
        line: &budget_lines::Model,
    ) -> Result<OpenCommitments, BudgetError> {
        let company_id = ctx.company_id.into_inner();

        let open_change_orders = change_orders::Entity::find()
            .filter(change_orders::Column::CompanyId.eq(company_id))
            .filter(change_orders::Column::BudgetLineId.eq(line.id))
            .filter(change_orders::Column::Status.is_in(OPEN_CHANGE_ORDER_STATUSES))
            .filter(change_orders::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?;

        let mut bill_query = bills::Entity::find()
            .filter(bills::Column::CompanyId.eq(company_id))
            .filter(bills::Column::JobId.eq(line.job_id))
            .filter(bills::Column::Status.is_in(UNPAID_BILL_STATUSES))
            .filter(bills::Column::DeletedAt.is_null());
        // Lines without a cost code block on any unpaid bill for the job.
        if let Some(cost_code_id) = line.cost_code_id {
            bill_query = bill_query.filter(bills::Column::CostCodeId.eq(cost_code_id));
        }
        let unpaid_bills = bill_query
            .count(&self.db)
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?;

        let outstanding_invoices = invoices::Entity::find()
            .filter(invoices::Column::CompanyId.eq(company_id))
            .filter(invoices::Column::JobId.eq(line.job_id))
            .filter(invoices::Column::Status.is_in(OUTSTANDING_INVOICE_STATUSES))
            .filter(invoices::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?;

        Ok(OpenCommitments {
            open_change_orders,
            unpaid_bills,
            outstanding_invoices,
        })
    }
}

/// Maps a database row to the domain type.
pub(crate) fn model_to_domain(model: &budget_lines::Model) -> BudgetLine {
    BudgetLine {
        id: BudgetLineId::from_uuid(model.id),
        company_id: CompanyId::from_uuid(model.company_id),
        job_id: JobId::from_uuid(model.job_id),
        cost_code_id: model.cost_code_id.map(CostCodeId::from_uuid),
        description: model.description.clone(),
        phase: model.phase.clone(),
        notes: model.notes.clone(),
        estimated_amount: model.estimated_amount,
        committed_amount: model.committed_amount,
        actual_amount: model.actual_amount,
        projected_amount: model.projected_amount,
        variance_amount: model.variance_amount,
        created_at: model.created_at.with_timezone(&chrono::Utc),
        updated_at: model.updated_at.with_timezone(&chrono::Utc),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_model_to_domain_maps_all_amounts() {
        let now = chrono::Utc::now().into();
        let model = budget_lines::Model {
            id: Uuid::now_v7(),
            company_id: Uuid::now_v7(),
            job_id: Uuid::now_v7(),
            cost_code_id: None,
            description: "09-900 Painting".to_string(),
            phase: Some("finishes".to_string()),
            notes: None,
            estimated_amount: dec!(12000),
            committed_amount: dec!(8000),
            actual_amount: dec!(3000),
            projected_amount: dec!(11500),
            variance_amount: dec!(9000),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let domain = model_to_domain(&model);
        assert_eq!(domain.id.into_inner(), model.id);
        assert_eq!(domain.estimated_amount, dec!(12000));
        assert_eq!(domain.committed_amount, dec!(8000));
        assert_eq!(domain.actual_amount, dec!(3000));
        assert_eq!(domain.projected_amount, dec!(11500));
        assert_eq!(domain.variance_amount, dec!(9000));
        assert_eq!(domain.cost_code_id, None);
    }

    #[test]
    fn test_open_status_sets_exclude_terminal() {
        assert!(!OPEN_CHANGE_ORDER_STATUSES.contains(&ChangeOrderStatus::Approved));
        assert!(!OPEN_CHANGE_ORDER_STATUSES.contains(&ChangeOrderStatus::Voided));
        assert!(!UNPAID_BILL_STATUSES.contains(&BillStatus::Paid));
        assert!(!UNPAID_BILL_STATUSES.contains(&BillStatus::Voided));
        assert!(!OUTSTANDING_INVOICE_STATUSES.contains(&InvoiceStatus::Paid));
        assert!(!OUTSTANDING_INVOICE_STATUSES.contains(&InvoiceStatus::Draft));
    }
}
