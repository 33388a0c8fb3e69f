//! Change-order routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sitecost_core::changeorder::ChangeOrder;
use sitecost_db::ChangeOrderRepository;
use sitecost_shared::types::ChangeOrderId;

use crate::middleware::TenantCtx;
use crate::{AppState, routes::change_order_error_response, routes::ensure_company};

/// Creates the change-order routes (tenant middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies/{company_id}/change-orders/{order_id}",
            get(get_change_order),
        )
        .route(
            "/companies/{company_id}/change-orders/{order_id}/submit",
            post(submit_change_order),
        )
        .route(
            "/companies/{company_id}/change-orders/{order_id}/send-back",
            post(send_back_change_order),
        )
        .route(
            "/companies/{company_id}/change-orders/{order_id}/present",
            post(present_change_order),
        )
        .route(
            "/companies/{company_id}/change-orders/{order_id}/negotiate",
            post(negotiate_change_order),
        )
        .route(
            "/companies/{company_id}/change-orders/{order_id}/approve",
            post(approve_change_order),
        )
        .route(
            "/companies/{company_id}/change-orders/{order_id}/reject",
            post(reject_change_order),
        )
        .route(
            "/companies/{company_id}/change-orders/{order_id}/withdraw",
            post(withdraw_change_order),
        )
        .route(
            "/companies/{company_id}/change-orders/{order_id}/void",
            post(void_change_order),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for rejecting a change order.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    /// Why the client rejected the order.
    pub reason: String,
}

/// Request body for voiding a change order.
#[derive(Debug, Deserialize)]
pub struct VoidRequest {
    /// Why the order was voided.
    pub reason: String,
}

/// Response for a change order. Money fields serialize as decimal strings.
#[derive(Debug, Serialize)]
pub struct ChangeOrderResponse {
    /// Change order ID.
    pub id: Uuid,
    /// Job ID.
    pub job_id: Uuid,
    /// Contract ID.
    pub contract_id: Uuid,
    /// Budget line ID.
    pub budget_line_id: Uuid,
    /// Scope description.
    pub description: String,
    /// Materials cost component.
    pub materials_cost: Decimal,
    /// Labor cost component.
    pub labor_cost: Decimal,
    /// Equipment cost component.
    pub equipment_cost: Decimal,
    /// Subcontractor cost component.
    pub subcontractor_cost: Decimal,
    /// Sum of the four cost components.
    pub subtotal: Decimal,
    /// Markup on the subtotal.
    pub markup_amount: Decimal,
    /// Subtotal plus markup.
    pub total_amount: Decimal,
    /// True when the order reduces scope.
    pub is_credit: bool,
    /// Lifecycle status.
    pub status: String,
    /// When the order was presented to the client.
    pub presented_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<ChangeOrder> for ChangeOrderResponse {
    fn from(order: ChangeOrder) -> Self {
        Self {
            id: order.id.into_inner(),
            job_id: order.job_id.into_inner(),
            contract_id: order.contract_id.into_inner(),
            budget_line_id: order.budget_line_id.into_inner(),
            description: order.description,
            materials_cost: order.materials_cost,
            labor_cost: order.labor_cost,
            equipment_cost: order.equipment_cost,
            subcontractor_cost: order.subcontractor_cost,
            subtotal: order.subtotal,
            markup_amount: order.markup_amount,
            total_amount: order.total_amount,
            is_credit: order.is_credit,
            status: order.status.as_str().to_string(),
            presented_at: order.presented_at,
            updated_at: order.updated_at,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/companies/{company_id}/change-orders/{order_id}` - Fetch one order.
async fn get_change_order(
    State(state): State<AppState>,
    tenant: TenantCtx,
    Path((company_id, order_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(response) = ensure_company(&tenant.0, company_id) {
        return response;
    }

    let repo = ChangeOrderRepository::new((*state.db).clone());
    match repo.get(&tenant.0, ChangeOrderId::from_uuid(order_id)).await {
        Ok(order) => Json(ChangeOrderResponse::from(order)).into_response(),
        Err(err) => change_order_error_response(&err),
    }
}

/// POST `.../submit` - Draft to internal review.
async fn submit_change_order(
    State(state): State<AppState>,
    tenant: TenantCtx,
    Path((company_id, order_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(response) = ensure_company(&tenant.0, company_id) {
        return response;
    }

    let repo = ChangeOrderRepository::new((*state.db).clone());
    match repo
        .submit(&tenant.0, ChangeOrderId::from_uuid(order_id))
        .await
    {
        Ok(order) => Json(ChangeOrderResponse::from(order)).into_response(),
        Err(err) => change_order_error_response(&err),
    }
}

/// POST `.../send-back` - Internal review back to draft.
async fn send_back_change_order(
    State(state): State<AppState>,
    tenant: TenantCtx,
    Path((company_id, order_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(response) = ensure_company(&tenant.0, company_id) {
        return response;
    }

    let repo = ChangeOrderRepository::new((*state.db).clone());
    match repo
        .send_back(&tenant.0, ChangeOrderId::from_uuid(order_id))
        .await
    {
        Ok(order) => Json(ChangeOrderResponse::from(order)).into_response(),
        Err(err) => change_order_error_response(&err),
    }
}

/// POST `.../present` - Present to the client; starts the withdrawal window.
async fn present_change_order(
    State(state): State<AppState>,
    tenant: TenantCtx,
    Path((company_id, order_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(response) = ensure_company(&tenant.0, company_id) {
        return response;
    }

    let repo = ChangeOrderRepository::new((*state.db).clone());
    match repo
        .present(&tenant.0, ChangeOrderId::from_uuid(order_id))
        .await
    {
        Ok(order) => Json(ChangeOrderResponse::from(order)).into_response(),
        Err(err) => change_order_error_response(&err),
    }
}

/// POST `.../negotiate` - Client pushed back; open negotiation.
async fn negotiate_change_order(
    State(state): State<AppState>,
    tenant: TenantCtx,
    Path((company_id, order_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(response) = ensure_company(&tenant.0, company_id) {
        return response;
    }

    let repo = ChangeOrderRepository::new((*state.db).clone());
    match repo
        .negotiate(&tenant.0, ChangeOrderId::from_uuid(order_id))
        .await
    {
        Ok(order) => Json(ChangeOrderResponse::from(order)).into_response(),
        Err(err) => change_order_error_response(&err),
    }
}

/// POST `.../approve` - Approve and apply the cascade atomically.
async fn approve_change_order(
    State(state): State<AppState>,
    tenant: TenantCtx,
    Path((company_id, order_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(response) = ensure_company(&tenant.0, company_id) {
        return response;
    }

    let repo = ChangeOrderRepository::new((*state.db).clone());
    match repo
        .approve(&tenant.0, ChangeOrderId::from_uuid(order_id))
        .await
    {
        Ok(order) => Json(ChangeOrderResponse::from(order)).into_response(),
        Err(err) => change_order_error_response(&err),
    }
}

/// POST `.../reject` - Client rejected the order.
async fn reject_change_order(
    State(state): State<AppState>,
    tenant: TenantCtx,
    Path((company_id, order_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<RejectRequest>,
) -> impl IntoResponse {
    if let Err(response) = ensure_company(&tenant.0, company_id) {
        return response;
    }

    let repo = ChangeOrderRepository::new((*state.db).clone());
    match repo
        .reject(&tenant.0, ChangeOrderId::from_uuid(order_id), body.reason)
        .await
    {
        Ok(order) => Json(ChangeOrderResponse::from(order)).into_response(),
        Err(err) => change_order_error_response(&err),
    }
}

/// POST `.../withdraw` - Withdraw within the configured window.
async fn withdraw_change_order(
    State(state): State<AppState>,
    tenant: TenantCtx,
    Path((company_id, order_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(response) = ensure_company(&tenant.0, company_id) {
        return response;
    }

    let window = Duration::hours(state.config.change_order.withdrawal_window_hours);
    let repo = ChangeOrderRepository::new((*state.db).clone());
    match repo
        .withdraw(&tenant.0, ChangeOrderId::from_uuid(order_id), window)
        .await
    {
        Ok(order) => Json(ChangeOrderResponse::from(order)).into_response(),
        Err(err) => change_order_error_response(&err),
    }
}

/// POST `.../void` - Void an order that never reached the client.
async fn void_change_order(
    State(state): State<AppState>,
    tenant: TenantCtx,
    Path((company_id, order_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<VoidRequest>,
) -> impl IntoResponse {
    if let Err(response) = ensure_company(&tenant.0, company_id) {
        return response;
    }

    let repo = ChangeOrderRepository::new((*state.db).clone());
    match repo
        .void(&tenant.0, ChangeOrderId::from_uuid(order_id), body.reason)
        .await
    {
        Ok(order) => Json(ChangeOrderResponse::from(order)).into_response(),
        Err(err) => change_order_error_response(&err),
    }
}
