use serde::Serialize;

use labstock_core::{StockError, StockResult};

use crate::role::Role;

/// Capability bits granted to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub can_add_components: bool,
    pub can_edit_components: bool,
    pub can_manage_users: bool,
    pub can_view_all_transactions: bool,
}

impl Capabilities {
    pub const fn none() -> Self {
        Self {
            can_add_components: false,
            can_edit_components: false,
            can_manage_users: false,
            can_view_all_transactions: false,
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::AddComponents => self.can_add_components,
            Capability::EditComponents => self.can_edit_components,
            Capability::ManageUsers => self.can_manage_users,
            Capability::ViewAllTransactions => self.can_view_all_transactions,
        }
    }
}

/// A single gated capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    AddComponents,
    EditComponents,
    ManageUsers,
    ViewAllTransactions,
}

/// Fixed role→capability table.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy lookup)
pub fn capabilities_for(role: Role) -> Capabilities {
    match role {
        Role::Administrator => Capabilities {
            can_add_components: true,
            can_edit_components: true,
            can_manage_users: true,
            can_view_all_transactions: true,
        },
        Role::LabTechnician => Capabilities {
            can_add_components: true,
            ..Capabilities::none()
        },
        Role::ManufacturingEngineer => Capabilities {
            can_view_all_transactions: true,
            ..Capabilities::none()
        },
        Role::Researcher | Role::StandardUser => Capabilities::none(),
    }
}

/// Gate helper: `Unauthorized` unless `role` grants `capability`.
///
/// Every gated mutation re-checks here; hiding a control in the UI is never
/// the sole enforcement.
pub fn require(role: Role, capability: Capability) -> StockResult<()> {
    if capabilities_for(role).allows(capability) {
        Ok(())
    } else {
        tracing::warn!(role = %role, ?capability, "capability denied");
        Err(StockError::Unauthorized)
    }
}
