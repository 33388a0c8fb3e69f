//! Tenant-resolution middleware for protected routes.
//!
//! Session and profile resolution happen upstream; the gateway forwards the
//! resolved identity as `X-Company-Id` and `X-User-Id` headers. This
//! middleware turns them into an explicit `TenantContext` request extension
//! so no handler ever reads tenant state ambiently.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use sitecost_shared::AppError;
use sitecost_shared::types::{CompanyId, TenantContext, UserId};

use crate::routes::app_error_response;

/// Header carrying the resolved company (tenant) id.
pub const COMPANY_ID_HEADER: &str = "x-company-id";
/// Header carrying the resolved acting-user id.
pub const USER_ID_HEADER: &str = "x-user-id";

fn header_uuid(request: &Request, name: &str) -> Option<Uuid> {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
}

/// Middleware that resolves the tenant context from gateway headers.
///
/// Requests without both headers (or with malformed UUIDs) are rejected
/// with 401 before reaching any handler.
pub async fn tenant_middleware(mut request: Request, next: Next) -> Response {
    let company_id = header_uuid(&request, COMPANY_ID_HEADER);
    let user_id = header_uuid(&request, USER_ID_HEADER);

    let (Some(company_id), Some(user_id)) = (company_id, user_id) else {
        return app_error_response(&AppError::Unauthorized(
            "X-Company-Id and X-User-Id headers are required".to_string(),
        ));
    };

    let ctx = TenantContext::new(
        CompanyId::from_uuid(company_id),
        UserId::from_uuid(user_id),
    );
    request.extensions_mut().insert(ctx);
    next.run(request).await
}

/// Extractor for the resolved tenant context.
///
/// Use this in handlers to get the caller's tenant scope:
///
/// ```ignore
/// async fn handler(tenant: TenantCtx) -> impl IntoResponse {
///     let company_id = tenant.0.company_id;
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TenantCtx(pub TenantContext);

impl<S> FromRequestParts<S> for TenantCtx
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .copied()
            .map(TenantCtx)
            .ok_or_else(|| {
                app_error_response(&AppError::Unauthorized(
                    "tenant context missing from request".to_string(),
                ))
            })
    }
}
