//! REST API routes.

pub mod budget_lines;
pub mod change_orders;
pub mod dashboard;
pub mod health;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use sitecost_core::budget::BudgetError;
use sitecost_core::changeorder::ChangeOrderError;
use sitecost_core::rollup::RollupError;
use sitecost_shared::AppError;
use sitecost_shared::types::TenantContext;

use crate::AppState;

/// Assembles all API routes; tenant-scoped routes get the tenant middleware.
pub fn api_routes() -> Router<AppState> {
    let protected = Router::new()
        .merge(budget_lines::routes())
        .merge(change_orders::routes())
        .merge(dashboard::routes())
        .layer(axum::middleware::from_fn(
            crate::middleware::tenant_middleware,
        ));

    Router::new().merge(health::routes()).merge(protected)
}

/// Builds the JSON error envelope used by every route.
fn error_response(status: u16, code: &str, message: &str) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(code, message, "request failed");
    }
    (status, Json(json!({ "error": code, "message": message }))).into_response()
}

/// Maps an application error to a response.
pub(crate) fn app_error_response(err: &AppError) -> Response {
    error_response(err.status_code(), err.error_code(), &err.to_string())
}

/// Maps a budget error to a response.
pub(crate) fn budget_error_response(err: &BudgetError) -> Response {
    error_response(err.status_code(), err.error_code(), &err.to_string())
}

/// Maps a change-order error to a response.
pub(crate) fn change_order_error_response(err: &ChangeOrderError) -> Response {
    error_response(err.status_code(), err.error_code(), &err.to_string())
}

/// Maps a rollup error to a response.
pub(crate) fn rollup_error_response(err: &RollupError) -> Response {
    error_response(err.status_code(), err.error_code(), &err.to_string())
}

/// Rejects requests whose path tenant does not match the resolved context.
pub(crate) fn ensure_company(ctx: &TenantContext, company_id: Uuid) -> Result<(), Response> {
    if ctx.company_id.into_inner() == company_id {
        Ok(())
    } else {
        Err(app_error_response(&AppError::Forbidden(
            "path company does not match tenant context".to_string(),
        )))
    }
}
