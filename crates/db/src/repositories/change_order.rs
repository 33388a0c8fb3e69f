//! Change-order repository: state transitions and the approval cascade.
//!
//! Transition validation lives in `ChangeOrderService`; this repository
//! loads rows, applies validated actions, and — for approval — applies the
//! cascade plan inside a single database transaction so contract value,
//! budget line, and draw schedule move together or not at all.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::error;

use sitecost_core::budget::Reconciler;
use sitecost_core::changeorder::{
    CascadePlan, ChangeOrder, ChangeOrderAction, ChangeOrderError, ChangeOrderService,
};
use sitecost_core::changeorder::ChangeOrderStatus as CoreStatus;
use sitecost_shared::types::{
    BudgetLineId, ChangeOrderId, CompanyId, ContractId, JobId, TenantContext,
};

use crate::entities::{
    budget_lines, change_orders, contracts, draw_requests,
    sea_orm_active_enums::{ChangeOrderStatus as DbStatus, DrawStatus},
};

/// Change-order repository.
#[derive(Debug, Clone)]
pub struct ChangeOrderRepository {
    db: DatabaseConnection,
}

impl ChangeOrderRepository {
    /// Creates a new change-order repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches a change order in the caller's tenant.
    ///
    /// # Errors
    ///
    /// Returns `ChangeOrderError::NotFound` if the order does not exist,
    /// belongs to another tenant, or is deleted.
    pub async fn get(
        &self,
        ctx: &TenantContext,
        order_id: ChangeOrderId,
    ) -> Result<ChangeOrder, ChangeOrderError> {
        let model = self.fetch(ctx, order_id).await?;
        Ok(model_to_domain(&model))
    }

    /// Submits a draft order for internal review.
    pub async fn submit(
        &self,
        ctx: &TenantContext,
        order_id: ChangeOrderId,
    ) -> Result<ChangeOrder, ChangeOrderError> {
        let model = self.fetch(ctx, order_id).await?;
        let action = ChangeOrderService::submit(db_status_to_core(&model.status), ctx.user_id)?;

        let mut active: change_orders::ActiveModel = model.into();
        active.submitted_by = Set(Some(ctx.user_id.into_inner()));
        self.apply(active, &action).await
    }

    /// Sends an order under review back to draft.
    pub async fn send_back(
        &self,
        ctx: &TenantContext,
        order_id: ChangeOrderId,
    ) -> Result<ChangeOrder, ChangeOrderError> {
        let model = self.fetch(ctx, order_id).await?;
        let action = ChangeOrderService::send_back(db_status_to_core(&model.status))?;
        self.apply(model.into(), &action).await
    }

    /// Presents a reviewed order to the client, starting the withdrawal window.
    pub async fn present(
        &self,
        ctx: &TenantContext,
        order_id: ChangeOrderId,
    ) -> Result<ChangeOrder, ChangeOrderError> {
        let model = self.fetch(ctx, order_id).await?;
        let action = ChangeOrderService::present(db_status_to_core(&model.status), Utc::now())?;

        let mut active: change_orders::ActiveModel = model.into();
        if let ChangeOrderAction::Present { presented_at, .. } = &action {
            active.presented_at = Set(Some((*presented_at).into()));
        }
        self.apply(active, &action).await
    }

    /// Moves a presented order into negotiation.
    pub async fn negotiate(
        &self,
        ctx: &TenantContext,
        order_id: ChangeOrderId,
    ) -> Result<ChangeOrder, ChangeOrderError> {
        let model = self.fetch(ctx, order_id).await?;
        let action = ChangeOrderService::negotiate(db_status_to_core(&model.status))?;
        self.apply(model.into(), &action).await
    }

    /// Rejects a client-facing order.
    pub async fn reject(
        &self,
        ctx: &TenantContext,
        order_id: ChangeOrderId,
        rejection_reason: String,
    ) -> Result<ChangeOrder, ChangeOrderError> {
        let model = self.fetch(ctx, order_id).await?;
        let action =
            ChangeOrderService::reject(db_status_to_core(&model.status), rejection_reason)?;

        let mut active: change_orders::ActiveModel = model.into();
        if let ChangeOrderAction::Reject {
            rejection_reason, ..
        } = &action
        {
            active.rejection_reason = Set(Some(rejection_reason.clone()));
        }
        self.apply(active, &action).await
    }

    /// Withdraws a client-facing order within the configured window.
    pub async fn withdraw(
        &self,
        ctx: &TenantContext,
        order_id: ChangeOrderId,
        window: Duration,
    ) -> Result<ChangeOrder, ChangeOrderError> {
        let model = self.fetch(ctx, order_id).await?;
        let presented_at = model.presented_at.map(|t| t.with_timezone(&Utc));
        let action = ChangeOrderService::withdraw(
            db_status_to_core(&model.status),
            presented_at,
            Utc::now(),
            window,
        )?;
        self.apply(model.into(), &action).await
    }

    /// Voids an unpresented order.
    pub async fn void(
        &self,
        ctx: &TenantContext,
        order_id: ChangeOrderId,
        void_reason: String,
    ) -> Result<ChangeOrder, ChangeOrderError> {
        let model = self.fetch(ctx, order_id).await?;
        let action = ChangeOrderService::void(db_status_to_core(&model.status), void_reason)?;

        let mut active: change_orders::ActiveModel = model.into();
        if let ChangeOrderAction::Void { void_reason, .. } = &action {
            active.void_reason = Set(Some(void_reason.clone()));
        }
        self.apply(active, &action).await
    }

    /// Approves a client-facing order and applies the cascade atomically.
    ///
    /// Contract value, budget-line committed/actual (with variance
    /// recomputed), and the earliest open draw's current due all move by the
    /// signed total inside one transaction. Any missing collaborator row or
    /// amount that would go negative rolls the whole approval back.
    ///
    /// # Errors
    ///
    /// Returns `ChangeOrderError::Cascade` when the plan cannot be applied;
    /// the order and all three target entities keep their pre-approval
    /// values in that case.
    pub async fn approve(
        &self,
        ctx: &TenantContext,
        order_id: ChangeOrderId,
    ) -> Result<ChangeOrder, ChangeOrderError> {
        let model = self.fetch(ctx, order_id).await?;
        let order = model_to_domain(&model);
        let action = ChangeOrderService::approve(&order, ctx.user_id)?;
        let ChangeOrderAction::Approve {
            approved_by, plan, ..
        } = &action
        else {
            return Err(ChangeOrderError::Database(
                "approve produced a non-approve action".to_string(),
            ));
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ChangeOrderError::Database(e.to_string()))?;

        let job_id = JobId::from_uuid(model.job_id);
        if let Err(cascade_err) = Self::apply_cascade(&txn, ctx, plan, job_id).await {
            error!(
                change_order_id = %plan.change_order_id,
                contract_id = %plan.contract_id,
                budget_line_id = %plan.budget_line_id,
                contract_delta = %plan.contract_delta,
                committed_delta = %plan.committed_delta,
                actual_delta = %plan.actual_delta,
                draw_delta = %plan.draw_delta,
                error = %cascade_err,
                "change order cascade failed; rolling back"
            );
            // Dropping the transaction rolls it back.
            return Err(cascade_err);
        }

        let now = Utc::now().into();
        let mut active: change_orders::ActiveModel = model.into();
        active.status = Set(DbStatus::Approved);
        active.approved_by = Set(Some(approved_by.into_inner()));
        active.approved_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active
            .update(&txn)
            .await
            .map_err(|e| ChangeOrderError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| ChangeOrderError::Database(e.to_string()))?;

        Ok(model_to_domain(&updated))
    }

    /// Applies the three collaborator updates of a cascade plan.
    async fn apply_cascade(
        txn: &DatabaseTransaction,
        ctx: &TenantContext,
        plan: &CascadePlan,
        job_id: JobId,
    ) -> Result<(), ChangeOrderError> {
        let cascade_err = |reason: String| ChangeOrderError::Cascade {
            change_order_id: plan.change_order_id,
            delta: plan.contract_delta,
            reason,
        };
        let now = Utc::now().into();

        // Contract value.
        let contract = contracts::Entity::find_by_id(plan.contract_id.into_inner())
            .filter(contracts::Column::CompanyId.eq(ctx.company_id.into_inner()))
            .filter(contracts::Column::DeletedAt.is_null())
            .one(txn)
            .await
            .map_err(|e| ChangeOrderError::Database(e.to_string()))?
            .ok_or_else(|| cascade_err(format!("contract {} not found", plan.contract_id)))?;

        let new_value = contract.contract_value + plan.contract_delta;
        if new_value < Decimal::ZERO {
            return Err(cascade_err(format!(
                "contract value would go negative: {new_value}"
            )));
        }
        let mut contract_active: contracts::ActiveModel = contract.into();
        contract_active.contract_value = Set(new_value);
        contract_active.updated_at = Set(now);
        contract_active
            .update(txn)
            .await
            .map_err(|e| ChangeOrderError::Database(e.to_string()))?;

        // Budget line committed/actual, with variance recomputed.
        let line = budget_lines::Entity::find_by_id(plan.budget_line_id.into_inner())
            .filter(budget_lines::Column::CompanyId.eq(ctx.company_id.into_inner()))
            .filter(budget_lines::Column::DeletedAt.is_null())
            .one(txn)
            .await
            .map_err(|e| ChangeOrderError::Database(e.to_string()))?
            .ok_or_else(|| {
                cascade_err(format!("budget line {} not found", plan.budget_line_id))
            })?;

        let new_committed = line.committed_amount + plan.committed_delta;
        let new_actual = line.actual_amount + plan.actual_delta;
        if new_committed < Decimal::ZERO || new_actual < Decimal::ZERO {
            return Err(cascade_err(format!(
                "budget line amounts would go negative: committed {new_committed}, actual {new_actual}"
            )));
        }
        let estimated = line.estimated_amount;
        let mut line_active: budget_lines::ActiveModel = line.into();
        line_active.committed_amount = Set(new_committed);
        line_active.actual_amount = Set(new_actual);
        line_active.variance_amount = Set(Reconciler::variance(estimated, new_actual));
        line_active.updated_at = Set(now);
        line_active
            .update(txn)
            .await
            .map_err(|e| ChangeOrderError::Database(e.to_string()))?;

        // Earliest open draw on the job.
        let draw = draw_requests::Entity::find()
            .filter(draw_requests::Column::CompanyId.eq(ctx.company_id.into_inner()))
            .filter(draw_requests::Column::JobId.eq(job_id.into_inner()))
            .filter(draw_requests::Column::Status.eq(DrawStatus::Open))
            .filter(draw_requests::Column::DeletedAt.is_null())
            .order_by_asc(draw_requests::Column::CreatedAt)
            .one(txn)
            .await
            .map_err(|e| ChangeOrderError::Database(e.to_string()))?
            .ok_or_else(|| cascade_err(format!("no open draw request for job {job_id}")))?;

        let new_due = draw.current_due + plan.draw_delta;
        if new_due < Decimal::ZERO {
            return Err(cascade_err(format!(
                "draw current due would go negative: {new_due}"
            )));
        }
        let mut draw_active: draw_requests::ActiveModel = draw.into();
        draw_active.current_due = Set(new_due);
        draw_active.updated_at = Set(now);
        draw_active
            .update(txn)
            .await
            .map_err(|e| ChangeOrderError::Database(e.to_string()))?;

        Ok(())
    }

    /// Writes a validated single-row transition back to the store.
    async fn apply(
        &self,
        mut active: change_orders::ActiveModel,
        action: &ChangeOrderAction,
    ) -> Result<ChangeOrder, ChangeOrderError> {
        active.status = Set(core_status_to_db(action.new_status()));
        active.updated_at = Set(Utc::now().into());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| ChangeOrderError::Database(e.to_string()))?;
        Ok(model_to_domain(&updated))
    }

    async fn fetch(
        &self,
        ctx: &TenantContext,
        order_id: ChangeOrderId,
    ) -> Result<change_orders::Model, ChangeOrderError> {
        change_orders::Entity::find_by_id(order_id.into_inner())
            .filter(change_orders::Column::CompanyId.eq(ctx.company_id.into_inner()))
            .filter(change_orders::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| ChangeOrderError::Database(e.to_string()))?
            .ok_or(ChangeOrderError::NotFound(order_id))
    }
}

/// Converts a database status to the core status.
pub(crate) fn db_status_to_core(status: &DbStatus) -> CoreStatus {
    match status {
        DbStatus::Draft => CoreStatus::Draft,
        DbStatus::InternalReview => CoreStatus::InternalReview,
        DbStatus::ClientPresented => CoreStatus::ClientPresented,
        DbStatus::Negotiation => CoreStatus::Negotiation,
        DbStatus::Approved => CoreStatus::Approved,
        DbStatus::Rejected => CoreStatus::Rejected,
        DbStatus::Withdrawn => CoreStatus::Withdrawn,
        DbStatus::Voided => CoreStatus::Voided,
    }
}

/// Converts a core status to the database status.
pub(crate) fn core_status_to_db(status: CoreStatus) -> DbStatus {
    match status {
        CoreStatus::Draft => DbStatus::Draft,
        CoreStatus::InternalReview => DbStatus::InternalReview,
        CoreStatus::ClientPresented => DbStatus::ClientPresented,
        CoreStatus::Negotiation => DbStatus::Negotiation,
        CoreStatus::Approved => DbStatus::Approved,
        CoreStatus::Rejected => DbStatus::Rejected,
        CoreStatus::Withdrawn => DbStatus::Withdrawn,
        CoreStatus::Voided => DbStatus::Voided,
    }
}

/// Maps a database row to the domain type.
pub(crate) fn model_to_domain(model: &change_orders::Model) -> ChangeOrder {
    ChangeOrder {
        id: ChangeOrderId::from_uuid(model.id),
        company_id: CompanyId::from_uuid(model.company_id),
        job_id: JobId::from_uuid(model.job_id),
        contract_id: ContractId::from_uuid(model.contract_id),
        budget_line_id: BudgetLineId::from_uuid(model.budget_line_id),
        description: model.description.clone(),
        materials_cost: model.materials_cost,
        labor_cost: model.labor_cost,
        equipment_cost: model.equipment_cost,
        subcontractor_cost: model.subcontractor_cost,
        subtotal: model.subtotal,
        markup_amount: model.markup_amount,
        total_amount: model.total_amount,
        is_credit: model.is_credit,
        status: db_status_to_core(&model.status),
        presented_at: model.presented_at.map(|t| t.with_timezone(&Utc)),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_round_trip() {
        for status in [
            CoreStatus::Draft,
            CoreStatus::InternalReview,
            CoreStatus::ClientPresented,
            CoreStatus::Negotiation,
            CoreStatus::Approved,
            CoreStatus::Rejected,
            CoreStatus::Withdrawn,
            CoreStatus::Voided,
        ] {
            assert_eq!(db_status_to_core(&core_status_to_db(status)), status);
        }
    }
}
