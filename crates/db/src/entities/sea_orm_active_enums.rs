//! `SeaORM` active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contract lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "contract_status")]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// Being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Signed and active.
    #[sea_orm(string_value = "active")]
    Active,
    /// Work complete.
    #[sea_orm(string_value = "complete")]
    Complete,
    /// Voided; excluded from rollups.
    #[sea_orm(string_value = "voided")]
    Voided,
}

/// Client invoice status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_status")]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Awaiting project-manager approval.
    #[sea_orm(string_value = "pm_pending")]
    PmPending,
    /// Awaiting accountant approval.
    #[sea_orm(string_value = "accountant_pending")]
    AccountantPending,
    /// Awaiting owner approval.
    #[sea_orm(string_value = "owner_pending")]
    OwnerPending,
    /// Approved, not yet drawn or paid.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Included in a draw request.
    #[sea_orm(string_value = "in_draw")]
    InDraw,
    /// Paid in full.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Voided.
    #[sea_orm(string_value = "voided")]
    Voided,
}

/// Vendor bill status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "bill_status")]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    /// Awaiting payment.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Partially paid.
    #[sea_orm(string_value = "partial")]
    Partial,
    /// Paid in full; excluded from the AP balance.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Voided; excluded from the AP balance.
    #[sea_orm(string_value = "voided")]
    Voided,
}

/// Change-order lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "change_order_status")]
#[serde(rename_all = "snake_case")]
pub enum ChangeOrderStatus {
    /// Being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Under internal review.
    #[sea_orm(string_value = "internal_review")]
    InternalReview,
    /// Presented to the client.
    #[sea_orm(string_value = "client_presented")]
    ClientPresented,
    /// Terms under negotiation.
    #[sea_orm(string_value = "negotiation")]
    Negotiation,
    /// Approved (terminal).
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected (terminal).
    #[sea_orm(string_value = "rejected")]
    Rejected,
    /// Withdrawn (terminal).
    #[sea_orm(string_value = "withdrawn")]
    Withdrawn,
    /// Voided (terminal).
    #[sea_orm(string_value = "voided")]
    Voided,
}

/// Draw request status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "draw_status")]
#[serde(rename_all = "snake_case")]
pub enum DrawStatus {
    /// Accepting amounts; the approval cascade targets the earliest open draw.
    #[sea_orm(string_value = "open")]
    Open,
    /// Submitted to the lender.
    #[sea_orm(string_value = "submitted")]
    Submitted,
    /// Funded.
    #[sea_orm(string_value = "funded")]
    Funded,
}
