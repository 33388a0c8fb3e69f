//! Tenant context passed explicitly into every engine call.
//!
//! Tenant identity is never read from ambient or global state; callers
//! resolve it at the edge (gateway headers, session lookup) and thread it
//! through as a value.

use serde::{Deserialize, Serialize};

use super::id::{CompanyId, UserId};

/// The tenant scope of a request: which company's ledger is being read or
/// written, and on whose behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    /// The company (tenant) every query must filter on.
    pub company_id: CompanyId,
    /// The acting user, recorded on writes.
    pub user_id: UserId,
}

impl TenantContext {
    /// Creates a tenant context.
    #[must_use]
    pub const fn new(company_id: CompanyId, user_id: UserId) -> Self {
        Self {
            company_id,
            user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_carries_both_ids() {
        let company = CompanyId::new();
        let user = UserId::new();
        let ctx = TenantContext::new(company, user);
        assert_eq!(ctx.company_id, company);
        assert_eq!(ctx.user_id, user);
    }
}
