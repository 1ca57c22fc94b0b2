use serde::{Deserialize, Serialize};

/// User role (closed set).
///
/// Roles are a closed enumeration so the capability table stays exhaustively
/// checkable; there is no role inheritance. Serialized names match the stored
/// account records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Admin")]
    Administrator,
    #[serde(rename = "User")]
    StandardUser,
    #[serde(rename = "Lab Technician")]
    LabTechnician,
    Researcher,
    #[serde(rename = "Manufacturing Engineer")]
    ManufacturingEngineer,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Administrator,
        Role::StandardUser,
        Role::LabTechnician,
        Role::Researcher,
        Role::ManufacturingEngineer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
            Role::StandardUser => "Standard User",
            Role::LabTechnician => "Lab Technician",
            Role::Researcher => "Researcher",
            Role::ManufacturingEngineer => "Manufacturing Engineer",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
