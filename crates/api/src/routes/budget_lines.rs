//! Budget-line routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use sitecost_core::budget::{BudgetLine, ReconcileInput};
use sitecost_db::BudgetLineRepository;
use sitecost_shared::types::BudgetLineId;

use crate::middleware::TenantCtx;
use crate::{AppState, routes::budget_error_response, routes::ensure_company};

/// Creates the budget-line routes (tenant middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies/{company_id}/budget-lines/{line_id}",
            get(get_budget_line),
        )
        .route(
            "/companies/{company_id}/budget-lines/{line_id}",
            patch(reconcile_budget_line),
        )
        .route(
            "/companies/{company_id}/budget-lines/{line_id}/archive",
            post(archive_budget_line),
        )
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for a budget line. Money fields serialize as decimal strings.
#[derive(Debug, Serialize)]
pub struct BudgetLineResponse {
    /// Budget line ID.
    pub id: Uuid,
    /// Job ID.
    pub job_id: Uuid,
    /// Cost code ID.
    pub cost_code_id: Option<Uuid>,
    /// Description.
    pub description: String,
    /// Phase label.
    pub phase: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Estimated amount.
    pub estimated_amount: Decimal,
    /// Committed amount.
    pub committed_amount: Decimal,
    /// Actual amount.
    pub actual_amount: Decimal,
    /// Projected amount.
    pub projected_amount: Decimal,
    /// Signed variance.
    pub variance_amount: Decimal,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<BudgetLine> for BudgetLineResponse {
    fn from(line: BudgetLine) -> Self {
        Self {
            id: line.id.into_inner(),
            job_id: line.job_id.into_inner(),
            cost_code_id: line.cost_code_id.map(sitecost_shared::types::CostCodeId::into_inner),
            description: line.description,
            phase: line.phase,
            notes: line.notes,
            estimated_amount: line.estimated_amount,
            committed_amount: line.committed_amount,
            actual_amount: line.actual_amount,
            projected_amount: line.projected_amount,
            variance_amount: line.variance_amount,
            updated_at: line.updated_at,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/companies/{company_id}/budget-lines/{line_id}` - Fetch one line.
async fn get_budget_line(
    State(state): State<AppState>,
    tenant: TenantCtx,
    Path((company_id, line_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(response) = ensure_company(&tenant.0, company_id) {
        return response;
    }

    let repo = BudgetLineRepository::new((*state.db).clone());
    match repo.get(&tenant.0, BudgetLineId::from_uuid(line_id)).await {
        Ok(line) => Json(BudgetLineResponse::from(line)).into_response(),
        Err(err) => budget_error_response(&err),
    }
}

/// PATCH `/companies/{company_id}/budget-lines/{line_id}` - Reconcile a
/// partial edit.
///
/// The body is three-state per field: an absent field keeps the stored
/// value, `null` clears it, a value replaces it.
async fn reconcile_budget_line(
    State(state): State<AppState>,
    tenant: TenantCtx,
    Path((company_id, line_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<ReconcileInput>,
) -> impl IntoResponse {
    if let Err(response) = ensure_company(&tenant.0, company_id) {
        return response;
    }

    let repo = BudgetLineRepository::new((*state.db).clone());
    match repo
        .reconcile(&tenant.0, BudgetLineId::from_uuid(line_id), input)
        .await
    {
        Ok(line) => Json(BudgetLineResponse::from(line)).into_response(),
        Err(err) => budget_error_response(&err),
    }
}

/// POST `/companies/{company_id}/budget-lines/{line_id}/archive` - Soft
/// delete; blocked while open commitments reference the line.
async fn archive_budget_line(
    State(state): State<AppState>,
    tenant: TenantCtx,
    Path((company_id, line_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(response) = ensure_company(&tenant.0, company_id) {
        return response;
    }

    let repo = BudgetLineRepository::new((*state.db).clone());
    match repo
        .archive(&tenant.0, BudgetLineId::from_uuid(line_id))
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => budget_error_response(&err),
    }
}
