//! Nullable authority: an in-memory role registry.

use quad_governance::Authority;
use quad_types::{Address, Role};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Roles and singletons set directly by the test.
#[derive(Default)]
pub struct NullAuthority {
    members: Mutex<HashSet<(Role, Address)>>,
    singletons: Mutex<HashMap<Role, Address>>,
}

impl NullAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, role: Role, address: impl Into<Address>) {
        self.members.lock().unwrap().insert((role, address.into()));
    }

    pub fn revoke(&self, role: Role, address: impl Into<Address>) {
        self.members.lock().unwrap().remove(&(role, address.into()));
    }

    /// Register the single holder of `role`, replacing any previous one.
    pub fn set_singleton(&self, role: Role, address: impl Into<Address>) {
        self.singletons.lock().unwrap().insert(role, address.into());
    }
}

impl Authority for NullAuthority {
    fn has_role(&self, role: Role, address: &Address) -> bool {
        self.members
            .lock()
            .unwrap()
            .contains(&(role, address.clone()))
    }

    fn singleton(&self, role: Role) -> Option<Address> {
        self.singletons.lock().unwrap().get(&role).cloned()
    }
}
