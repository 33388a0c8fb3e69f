//! Shared types, errors, and configuration for Sitecost.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Three-state field patches for partial edits
//! - The tenant context passed into every engine call
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
