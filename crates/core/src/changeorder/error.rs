//! Change-order error types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use sitecost_shared::types::ChangeOrderId;

use super::types::ChangeOrderStatus;

/// Errors that can occur during change-order operations.
#[derive(Debug, Error)]
pub enum ChangeOrderError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: ChangeOrderStatus,
        /// The attempted target status.
        to: ChangeOrderStatus,
    },

    /// Withdrawal attempted after the window closed.
    #[error(
        "Withdrawal window of {window_hours}h expired; order was presented at {presented_at}"
    )]
    WindowExpired {
        /// When the order was presented to the client.
        presented_at: DateTime<Utc>,
        /// The configured window in hours.
        window_hours: i64,
    },

    /// A client-facing order has no presentation timestamp on record.
    #[error("Change order has no client presentation timestamp")]
    MissingPresentation,

    /// Cost components do not add up to the subtotal.
    #[error("Cost components sum to {actual}, subtotal says {expected}")]
    SubtotalMismatch {
        /// The stored subtotal.
        expected: Decimal,
        /// The sum of the four cost components.
        actual: Decimal,
    },

    /// Subtotal plus markup does not equal the total.
    #[error("Subtotal plus markup is {actual}, total says {expected}")]
    TotalMismatch {
        /// The stored total.
        expected: Decimal,
        /// Subtotal plus markup.
        actual: Decimal,
    },

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// Void reason is required but not provided.
    #[error("Void reason is required")]
    VoidReasonRequired,

    /// The approval cascade could not be applied atomically.
    #[error("Cascade failed for change order {change_order_id} (delta {delta}): {reason}")]
    Cascade {
        /// The change order being approved.
        change_order_id: ChangeOrderId,
        /// The signed total the cascade attempted to apply.
        delta: Decimal,
        /// What went wrong.
        reason: String,
    },

    /// Change order not found in the tenant's ledger.
    #[error("Change order not found: {0}")]
    NotFound(ChangeOrderId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl ChangeOrderError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. }
            | Self::RejectionReasonRequired
            | Self::VoidReasonRequired => 400,
            Self::SubtotalMismatch { .. }
            | Self::TotalMismatch { .. }
            | Self::MissingPresentation => 422,
            Self::WindowExpired { .. } => 409,
            Self::NotFound(_) => 404,
            Self::Cascade { .. } | Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::WindowExpired { .. } => "WINDOW_EXPIRED",
            Self::MissingPresentation => "MISSING_PRESENTATION",
            Self::SubtotalMismatch { .. } => "SUBTOTAL_MISMATCH",
            Self::TotalMismatch { .. } => "TOTAL_MISMATCH",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::VoidReasonRequired => "VOID_REASON_REQUIRED",
            Self::Cascade { .. } => "CASCADE_FAILED",
            Self::NotFound(_) => "CHANGE_ORDER_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
