//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `JobId` where a `CompanyId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(CompanyId, "Unique identifier for a company (tenant).");
typed_id!(UserId, "Unique identifier for a user.");
typed_id!(JobId, "Unique identifier for a job (project).");
typed_id!(CostCodeId, "Unique identifier for a cost code.");
typed_id!(BudgetLineId, "Unique identifier for a budget line.");
typed_id!(ContractId, "Unique identifier for a contract.");
typed_id!(InvoiceId, "Unique identifier for a client invoice.");
typed_id!(BillId, "Unique identifier for a vendor bill.");
typed_id!(ChangeOrderId, "Unique identifier for a change order.");
typed_id!(DrawRequestId, "Unique identifier for a draw request.");
typed_id!(VendorId, "Unique identifier for a vendor.");
typed_id!(ClientId, "Unique identifier for a client.");

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
