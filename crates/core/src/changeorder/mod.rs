//! Change-order lifecycle management.
//!
//! This module implements the change-order state machine, the withdrawal
//! window, cost-breakdown validation, and the cascade plan computed on
//! approval. Applying the plan atomically is the repository layer's job.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ChangeOrderError;
pub use service::ChangeOrderService;
pub use types::{CascadePlan, ChangeOrder, ChangeOrderAction, ChangeOrderStatus};
