//! `SeaORM` entity definitions for the Sitecost schema.

pub mod bills;
pub mod budget_lines;
pub mod change_orders;
pub mod companies;
pub mod contracts;
pub mod cost_codes;
pub mod draw_requests;
pub mod invoices;
pub mod jobs;
pub mod sea_orm_active_enums;
