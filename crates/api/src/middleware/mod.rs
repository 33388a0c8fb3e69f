//! Request middleware.

pub mod tenant;

pub use tenant::{TenantCtx, tenant_middleware};
