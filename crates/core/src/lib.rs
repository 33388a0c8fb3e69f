//! Core business logic for Sitecost.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `budget` - Budget-line reconciliation and archive guards
//! - `rollup` - Company-wide financial KPI aggregation
//! - `changeorder` - Change-order lifecycle and approval cascade planning

pub mod budget;
pub mod changeorder;
pub mod rollup;
