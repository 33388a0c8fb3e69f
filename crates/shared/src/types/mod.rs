//! Common types used across the application.

pub mod id;
pub mod patch;
pub mod tenant;

pub use id::*;
pub use patch::FieldPatch;
pub use tenant::TenantContext;
