//! Rollup error types.

use thiserror::Error;

use super::store::StoreError;

/// Errors that can occur during KPI aggregation.
#[derive(Debug, Error)]
pub enum RollupError {
    /// A record-store fetch failed; the whole aggregation is abandoned
    /// rather than returning partial totals.
    #[error("rollup aborted: {0}")]
    Store(#[from] StoreError),
}

impl RollupError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Store(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Store(_) => "ROLLUP_FETCH_FAILED",
        }
    }
}
