//! Change-order state transitions and cascade planning.
//!
//! All methods are associated functions that validate a transition and
//! return the `ChangeOrderAction` to persist. The clock is always an
//! explicit argument; nothing here reads ambient time.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use sitecost_shared::types::UserId;

use super::error::ChangeOrderError;
use super::types::{CascadePlan, ChangeOrder, ChangeOrderAction, ChangeOrderStatus};

/// Stateless service for managing change-order transitions.
pub struct ChangeOrderService;

impl ChangeOrderService {
    /// Submit a draft order for internal review.
    ///
    /// # Errors
    ///
    /// Returns `ChangeOrderError::InvalidTransition` if not in draft.
    pub fn submit(
        current_status: ChangeOrderStatus,
        submitted_by: UserId,
    ) -> Result<ChangeOrderAction, ChangeOrderError> {
        match current_status {
            ChangeOrderStatus::Draft => Ok(ChangeOrderAction::Submit {
                new_status: ChangeOrderStatus::InternalReview,
                submitted_by,
            }),
            _ => Err(ChangeOrderError::InvalidTransition {
                from: current_status,
                to: ChangeOrderStatus::InternalReview,
            }),
        }
    }

    /// Send an order under internal review back to draft.
    ///
    /// # Errors
    ///
    /// Returns `ChangeOrderError::InvalidTransition` if not under review.
    pub fn send_back(
        current_status: ChangeOrderStatus,
    ) -> Result<ChangeOrderAction, ChangeOrderError> {
        match current_status {
            ChangeOrderStatus::InternalReview => Ok(ChangeOrderAction::SendBack {
                new_status: ChangeOrderStatus::Draft,
            }),
            _ => Err(ChangeOrderError::InvalidTransition {
                from: current_status,
                to: ChangeOrderStatus::Draft,
            }),
        }
    }

    /// Present a reviewed order to the client, starting the withdrawal window.
    ///
    /// # Errors
    ///
    /// Returns `ChangeOrderError::InvalidTransition` if not under review.
    pub fn present(
        current_status: ChangeOrderStatus,
        now: DateTime<Utc>,
    ) -> Result<ChangeOrderAction, ChangeOrderError> {
        match current_status {
            ChangeOrderStatus::InternalReview => Ok(ChangeOrderAction::Present {
                new_status: ChangeOrderStatus::ClientPresented,
                presented_at: now,
            }),
            _ => Err(ChangeOrderError::InvalidTransition {
                from: current_status,
                to: ChangeOrderStatus::ClientPresented,
            }),
        }
    }

    /// Move a presented order into negotiation.
    ///
    /// # Errors
    ///
    /// Returns `ChangeOrderError::InvalidTransition` if not client-presented.
    pub fn negotiate(
        current_status: ChangeOrderStatus,
    ) -> Result<ChangeOrderAction, ChangeOrderError> {
        match current_status {
            ChangeOrderStatus::ClientPresented => Ok(ChangeOrderAction::Negotiate {
                new_status: ChangeOrderStatus::Negotiation,
            }),
            _ => Err(ChangeOrderError::InvalidTransition {
                from: current_status,
                to: ChangeOrderStatus::Negotiation,
            }),
        }
    }

    /// Approve a client-facing order and plan the cascade.
    ///
    /// Validates the cost identity first, then computes the four deltas the
    /// repository must apply in one transaction. The sign of every delta
    /// follows `is_credit`.
    ///
    /// # Errors
    ///
    /// Returns `ChangeOrderError::InvalidTransition` if the order is not in
    /// front of the client, or a cost-identity error if the stored amounts
    /// do not add up.
    pub fn approve(
        order: &ChangeOrder,
        approved_by: UserId,
    ) -> Result<ChangeOrderAction, ChangeOrderError> {
        if !order.status.is_client_facing() {
            return Err(ChangeOrderError::InvalidTransition {
                from: order.status,
                to: ChangeOrderStatus::Approved,
            });
        }

        Self::validate_costs(order)?;

        let delta = Self::signed_total(order);
        Ok(ChangeOrderAction::Approve {
            new_status: ChangeOrderStatus::Approved,
            approved_by,
            plan: CascadePlan {
                change_order_id: order.id,
                contract_id: order.contract_id,
                budget_line_id: order.budget_line_id,
                contract_delta: delta,
                committed_delta: delta,
                actual_delta: delta,
                draw_delta: delta,
            },
        })
    }

    /// Reject a client-facing order.
    ///
    /// # Errors
    ///
    /// Returns `ChangeOrderError::InvalidTransition` if the order is not in
    /// front of the client, or `ChangeOrderError::RejectionReasonRequired`
    /// if the reason is empty.
    pub fn reject(
        current_status: ChangeOrderStatus,
        rejection_reason: String,
    ) -> Result<ChangeOrderAction, ChangeOrderError> {
        if rejection_reason.trim().is_empty() {
            return Err(ChangeOrderError::RejectionReasonRequired);
        }

        if !current_status.is_client_facing() {
            return Err(ChangeOrderError::InvalidTransition {
                from: current_status,
                to: ChangeOrderStatus::Rejected,
            });
        }

        Ok(ChangeOrderAction::Reject {
            new_status: ChangeOrderStatus::Rejected,
            rejection_reason,
        })
    }

    /// Withdraw a client-facing order within the withdrawal window.
    ///
    /// The window runs from `presented_at` for `window`; the boundary
    /// instant itself is still inside the window.
    ///
    /// # Errors
    ///
    /// Returns `ChangeOrderError::InvalidTransition` if the order is not in
    /// front of the client, `ChangeOrderError::MissingPresentation` if no
    /// presentation timestamp exists, or `ChangeOrderError::WindowExpired`
    /// if `now` is past the window.
    pub fn withdraw(
        current_status: ChangeOrderStatus,
        presented_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Result<ChangeOrderAction, ChangeOrderError> {
        if !current_status.is_client_facing() {
            return Err(ChangeOrderError::InvalidTransition {
                from: current_status,
                to: ChangeOrderStatus::Withdrawn,
            });
        }

        let presented_at = presented_at.ok_or(ChangeOrderError::MissingPresentation)?;

        if now > presented_at + window {
            return Err(ChangeOrderError::WindowExpired {
                presented_at,
                window_hours: window.num_hours(),
            });
        }

        Ok(ChangeOrderAction::Withdraw {
            new_status: ChangeOrderStatus::Withdrawn,
        })
    }

    /// Void an order that has not been presented to the client.
    ///
    /// # Errors
    ///
    /// Returns `ChangeOrderError::InvalidTransition` if the order already
    /// reached the client, or `ChangeOrderError::VoidReasonRequired` if the
    /// reason is empty.
    pub fn void(
        current_status: ChangeOrderStatus,
        void_reason: String,
    ) -> Result<ChangeOrderAction, ChangeOrderError> {
        if void_reason.trim().is_empty() {
            return Err(ChangeOrderError::VoidReasonRequired);
        }

        match current_status {
            ChangeOrderStatus::Draft | ChangeOrderStatus::InternalReview => {
                Ok(ChangeOrderAction::Void {
                    new_status: ChangeOrderStatus::Voided,
                    void_reason,
                })
            }
            _ => Err(ChangeOrderError::InvalidTransition {
                from: current_status,
                to: ChangeOrderStatus::Voided,
            }),
        }
    }

    /// The total with the credit sign applied.
    #[must_use]
    pub fn signed_total(order: &ChangeOrder) -> Decimal {
        if order.is_credit {
            -order.total_amount
        } else {
            order.total_amount
        }
    }

    /// Validates the cost identity of an order.
    ///
    /// # Errors
    ///
    /// Returns `ChangeOrderError::SubtotalMismatch` when the four components
    /// do not sum to the subtotal, or `ChangeOrderError::TotalMismatch` when
    /// subtotal plus markup does not equal the total.
    pub fn validate_costs(order: &ChangeOrder) -> Result<(), ChangeOrderError> {
        let components = order.materials_cost
            + order.labor_cost
            + order.equipment_cost
            + order.subcontractor_cost;
        if components != order.subtotal {
            return Err(ChangeOrderError::SubtotalMismatch {
                expected: order.subtotal,
                actual: components,
            });
        }

        let total = order.subtotal + order.markup_amount;
        if total != order.total_amount {
            return Err(ChangeOrderError::TotalMismatch {
                expected: order.total_amount,
                actual: total,
            });
        }

        Ok(())
    }

    /// Check if a status transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: ChangeOrderStatus, to: ChangeOrderStatus) -> bool {
        use ChangeOrderStatus as S;
        matches!(
            (from, to),
            (S::Draft, S::InternalReview | S::Voided)
                | (S::InternalReview, S::Draft | S::ClientPresented | S::Voided)
                | (S::ClientPresented, S::Negotiation)
                | (
                    S::ClientPresented | S::Negotiation,
                    S::Approved | S::Rejected | S::Withdrawn
                )
        )
    }
}
