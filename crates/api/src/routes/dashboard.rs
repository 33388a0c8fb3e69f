//! Dashboard KPI routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use sitecost_core::rollup::RollupService;
use sitecost_db::RollupRepository;

use crate::middleware::TenantCtx;
use crate::{AppState, routes::ensure_company, routes::rollup_error_response};

/// Creates the dashboard routes (tenant middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/companies/{company_id}/dashboard/kpis",
        get(get_dashboard_kpis),
    )
}

/// Query parameters for dashboard KPIs.
#[derive(Debug, Deserialize)]
pub struct KpiQuery {
    /// Limit contracts, invoices, and bills to records dated on or before
    /// this instant.
    pub as_of: Option<DateTime<Utc>>,
}

/// GET `/companies/{company_id}/dashboard/kpis` - Company-wide financial KPIs.
///
/// The underlying fetches run concurrently without a snapshot; totals are
/// approximately as of now. A failed fetch fails the request; there is no
/// partial response.
async fn get_dashboard_kpis(
    State(state): State<AppState>,
    tenant: TenantCtx,
    Path(company_id): Path<Uuid>,
    Query(query): Query<KpiQuery>,
) -> impl IntoResponse {
    if let Err(response) = ensure_company(&tenant.0, company_id) {
        return response;
    }

    let store = RollupRepository::new((*state.db).clone());
    match RollupService::aggregate(&store, &tenant.0, query.as_of).await {
        Ok(kpis) => Json(kpis).into_response(),
        Err(err) => rollup_error_response(&err),
    }
}
