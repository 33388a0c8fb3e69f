//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//!
//! Every repository read and write is tenant-scoped: queries filter on
//! `company_id` and exclude soft-deleted rows. Cross-tenant leakage is a
//! correctness bug, not a cosmetic one.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{BudgetLineRepository, ChangeOrderRepository, RollupRepository};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
