use dashmap::DashMap;
use std::sync::Arc;

use sysreg_core::error::Result;
use sysreg_core::id::{CallerId, EntityId};

use super::role::RoleMask;

/// Where ownership and membership facts come from.
pub trait MembershipSource: Send + Sync {
    /// The owner recorded on the entity, if any.
    fn lookup_owner(&self, entity: EntityId) -> Result<Option<CallerId>>;

    /// The caller's membership role mask on the entity, if any.
    fn lookup_membership(&self, entity: EntityId, caller: CallerId) -> Result<Option<RoleMask>>;
}

/// Membership facts held in memory.
#[derive(Clone, Default)]
pub struct InMemoryMembershipSource {
    owners: Arc<DashMap<EntityId, CallerId>>,
    members: Arc<DashMap<(EntityId, CallerId), RoleMask>>,
}

impl InMemoryMembershipSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_owner(&self, entity: EntityId, owner: CallerId) {
        self.owners.insert(entity, owner);
    }

    pub fn add_member(&self, entity: EntityId, caller: CallerId, roles: RoleMask) {
        self.members.insert((entity, caller), roles);
    }
}

impl MembershipSource for InMemoryMembershipSource {
    fn lookup_owner(&self, entity: EntityId) -> Result<Option<CallerId>> {
        Ok(self.owners.get(&entity).map(|owner| *owner))
    }

    fn lookup_membership(&self, entity: EntityId, caller: CallerId) -> Result<Option<RoleMask>> {
        Ok(self.members.get(&(entity, caller)).map(|roles| *roles))
    }
}
