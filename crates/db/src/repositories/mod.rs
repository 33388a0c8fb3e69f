//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Every operation takes the caller's `TenantContext` and
//! filters on it.

pub mod budget_line;
pub mod change_order;
pub mod rollup;

pub use budget_line::BudgetLineRepository;
pub use change_order::ChangeOrderRepository;
pub use rollup::RollupRepository;
