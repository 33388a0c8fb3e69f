//! Change-order domain types.
//!
//! The lifecycle is:
//! - draft → internal_review (submit)
//! - internal_review → draft (send back)
//! - internal_review → client_presented (present)
//! - client_presented → negotiation (negotiate)
//! - client_presented | negotiation → approved | rejected | withdrawn
//! - draft | internal_review → voided
//!
//! Approved, rejected, withdrawn, and voided are terminal; no transition
//! leaves a terminal state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use sitecost_shared::types::{
    BudgetLineId, ChangeOrderId, CompanyId, ContractId, JobId, UserId,
};

/// Change-order status in the approval lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOrderStatus {
    /// Being drafted; editable.
    Draft,
    /// Under internal review before client presentation.
    InternalReview,
    /// Presented to the client; the withdrawal window starts here.
    ClientPresented,
    /// Client pushed back; terms under negotiation.
    Negotiation,
    /// Approved; cascade applied (immutable).
    Approved,
    /// Rejected by the client (immutable).
    Rejected,
    /// Withdrawn by the contractor within the window (immutable).
    Withdrawn,
    /// Voided before presentation (immutable).
    Voided,
}

impl ChangeOrderStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InternalReview => "internal_review",
            Self::ClientPresented => "client_presented",
            Self::Negotiation => "negotiation",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
            Self::Voided => "voided",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "internal_review" => Some(Self::InternalReview),
            "client_presented" => Some(Self::ClientPresented),
            "negotiation" => Some(Self::Negotiation),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "withdrawn" => Some(Self::Withdrawn),
            "voided" => Some(Self::Voided),
            _ => None,
        }
    }

    /// Returns true if the status is terminal (immutable).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Approved | Self::Rejected | Self::Withdrawn | Self::Voided
        )
    }

    /// Returns true if the order is in front of the client.
    #[must_use]
    pub const fn is_client_facing(self) -> bool {
        matches!(self, Self::ClientPresented | Self::Negotiation)
    }
}

impl fmt::Display for ChangeOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A change order against a contract.
///
/// Cost identity: `materials + labor + equipment + subcontractor == subtotal`
/// and `subtotal + markup == total`. A credit order negates every delta it
/// applies on approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeOrder {
    /// Change order ID.
    pub id: ChangeOrderId,
    /// Owning company (tenant).
    pub company_id: CompanyId,
    /// Job this order belongs to.
    pub job_id: JobId,
    /// Contract whose value the order adjusts.
    pub contract_id: ContractId,
    /// Budget line whose committed/actual amounts the order adjusts.
    pub budget_line_id: BudgetLineId,
    /// Scope description.
    pub description: String,
    /// Materials cost component.
    pub materials_cost: Decimal,
    /// Labor cost component.
    pub labor_cost: Decimal,
    /// Equipment cost component.
    pub equipment_cost: Decimal,
    /// Subcontractor cost component.
    pub subcontractor_cost: Decimal,
    /// Sum of the four cost components.
    pub subtotal: Decimal,
    /// Markup on the subtotal.
    pub markup_amount: Decimal,
    /// Subtotal plus markup.
    pub total_amount: Decimal,
    /// True when the order reduces scope; negates every applied delta.
    pub is_credit: bool,
    /// Lifecycle status.
    pub status: ChangeOrderStatus,
    /// When the order was presented to the client.
    pub presented_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// The atomic multi-entity update an approval must apply.
///
/// All four deltas move together or not at all: contract value, the target
/// budget line's committed and actual amounts, and the earliest open draw's
/// current due.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CascadePlan {
    /// The approved change order.
    pub change_order_id: ChangeOrderId,
    /// Contract receiving the value delta.
    pub contract_id: ContractId,
    /// Budget line receiving the committed/actual deltas.
    pub budget_line_id: BudgetLineId,
    /// Delta applied to the contract value.
    pub contract_delta: Decimal,
    /// Delta applied to the budget line's committed amount.
    pub committed_delta: Decimal,
    /// Delta applied to the budget line's actual amount.
    pub actual_delta: Decimal,
    /// Delta applied to the earliest open draw's current due.
    pub draw_delta: Decimal,
}

/// Change-order action representing a validated state transition.
///
/// Each variant captures the resulting status and the audit data the
/// repository persists alongside it.
#[derive(Debug, Clone)]
pub enum ChangeOrderAction {
    /// Submit a draft for internal review.
    Submit {
        /// The new status after submission.
        new_status: ChangeOrderStatus,
        /// The user who submitted the order.
        submitted_by: UserId,
    },
    /// Send an order under review back to draft.
    SendBack {
        /// The new status after send-back.
        new_status: ChangeOrderStatus,
    },
    /// Present a reviewed order to the client.
    Present {
        /// The new status after presentation.
        new_status: ChangeOrderStatus,
        /// When the client saw the order; starts the withdrawal window.
        presented_at: DateTime<Utc>,
    },
    /// Move a presented order into negotiation.
    Negotiate {
        /// The new status after the move.
        new_status: ChangeOrderStatus,
    },
    /// Approve a client-facing order.
    Approve {
        /// The new status after approval.
        new_status: ChangeOrderStatus,
        /// The user who approved the order.
        approved_by: UserId,
        /// The atomic update the repository must apply.
        plan: CascadePlan,
    },
    /// Reject a client-facing order.
    Reject {
        /// The new status after rejection.
        new_status: ChangeOrderStatus,
        /// The reason for rejection.
        rejection_reason: String,
    },
    /// Withdraw a client-facing order within the window.
    Withdraw {
        /// The new status after withdrawal.
        new_status: ChangeOrderStatus,
    },
    /// Void an unpresented order.
    Void {
        /// The new status after voiding.
        new_status: ChangeOrderStatus,
        /// The reason for voiding.
        void_reason: String,
    },
}

impl ChangeOrderAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> ChangeOrderStatus {
        match self {
            Self::Submit { new_status, .. }
            | Self::SendBack { new_status }
            | Self::Present { new_status, .. }
            | Self::Negotiate { new_status }
            | Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. }
            | Self::Withdraw { new_status }
            | Self::Void { new_status, .. } => *new_status,
        }
    }
}
