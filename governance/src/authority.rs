//! The role registry, consumed through its query interface.

use crate::error::GovernanceError;
use quad_types::{Address, Role};

/// Read access to the role registry.
///
/// Injected into each chamber at construction. The registry's own rules
/// for granting roles live elsewhere.
pub trait Authority: Send + Sync {
    /// Whether `address` holds `role`.
    fn has_role(&self, role: Role, address: &Address) -> bool;

    /// The address registered for a singleton role, if any.
    fn singleton(&self, role: Role) -> Option<Address>;
}

/// Fail with [`GovernanceError::MissingRole`] unless `address` holds `role`.
pub fn require_role(
    authority: &dyn Authority,
    role: Role,
    address: &Address,
) -> Result<(), GovernanceError> {
    if authority.has_role(role, address) {
        Ok(())
    } else {
        Err(GovernanceError::MissingRole {
            role,
            address: address.clone(),
        })
    }
}

/// Resolve a singleton role or fail with [`GovernanceError::MissingSingleton`].
pub fn resolve_singleton(authority: &dyn Authority, role: Role) -> Result<Address, GovernanceError> {
    authority
        .singleton(role)
        .ok_or(GovernanceError::MissingSingleton(role))
}
