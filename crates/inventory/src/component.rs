use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use labstock_core::{ComponentId, Entity, StockError, StockResult};

/// Component category (closed set).
///
/// Categories are an enumeration rather than free-form strings so that
/// filters and rollups stay exhaustively checkable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Resistors,
    Capacitors,
    Inductors,
    Diodes,
    Transistors,
    #[serde(rename = "Integrated Circuits (ICs)")]
    IntegratedCircuits,
    Connectors,
    Sensors,
    #[serde(rename = "Microcontrollers/Development Boards")]
    DevelopmentBoards,
    #[serde(rename = "Switches/Buttons")]
    Switches,
    #[serde(rename = "LEDs/Displays")]
    LedsDisplays,
    #[serde(rename = "Cables/Wires")]
    CablesWires,
    #[serde(rename = "Mechanical Parts/Hardware")]
    MechanicalHardware,
    #[serde(rename = "Miscellaneous Lab Supplies")]
    MiscLabSupplies,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Category::Resistors,
        Category::Capacitors,
        Category::Inductors,
        Category::Diodes,
        Category::Transistors,
        Category::IntegratedCircuits,
        Category::Connectors,
        Category::Sensors,
        Category::DevelopmentBoards,
        Category::Switches,
        Category::LedsDisplays,
        Category::CablesWires,
        Category::MechanicalHardware,
        Category::MiscLabSupplies,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Resistors => "Resistors",
            Category::Capacitors => "Capacitors",
            Category::Inductors => "Inductors",
            Category::Diodes => "Diodes",
            Category::Transistors => "Transistors",
            Category::IntegratedCircuits => "Integrated Circuits (ICs)",
            Category::Connectors => "Connectors",
            Category::Sensors => "Sensors",
            Category::DevelopmentBoards => "Microcontrollers/Development Boards",
            Category::Switches => "Switches/Buttons",
            Category::LedsDisplays => "LEDs/Displays",
            Category::CablesWires => "Cables/Wires",
            Category::MechanicalHardware => "Mechanical Parts/Hardware",
            Category::MiscLabSupplies => "Miscellaneous Lab Supplies",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// A stocked component type.
///
/// # Invariants
/// - `quantity` equals the net of all ledger transactions recorded for this
///   component since creation. It is only ever changed through
///   [`apply_movement`](crate::movement::apply_movement); the metadata edit
///   path ([`ComponentPatch`]) has no quantity field by construction.
/// - `unit_price` is non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub manufacturer: String,
    pub part_number: String,
    pub description: String,
    pub quantity: u32,
    pub location: String,
    pub unit_price: Decimal,
    pub datasheet_link: String,
    pub category: Category,
    pub critical_low_threshold: u32,
    pub created_at: DateTime<Utc>,
    /// Timestamp of the most recent outward movement, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_outward_at: Option<DateTime<Utc>>,
}

impl Entity for Component {
    type Id = ComponentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Component {
    /// Create a component from validated input.
    pub fn create(
        id: ComponentId,
        new: NewComponent,
        created_at: DateTime<Utc>,
    ) -> StockResult<Self> {
        if new.name.trim().is_empty() {
            return Err(StockError::validation("component name cannot be empty"));
        }
        if new.unit_price.is_sign_negative() {
            return Err(StockError::validation("unit price cannot be negative"));
        }

        Ok(Self {
            id,
            name: new.name.trim().to_string(),
            manufacturer: new.manufacturer,
            part_number: new.part_number,
            description: new.description,
            quantity: new.quantity,
            location: new.location,
            unit_price: new.unit_price,
            datasheet_link: new.datasheet_link,
            category: new.category,
            critical_low_threshold: new.critical_low_threshold,
            created_at,
            last_outward_at: None,
        })
    }
}

/// Input for creating a component (identifier and creation timestamp are
/// assigned by the caller).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComponent {
    pub name: String,
    pub manufacturer: String,
    pub part_number: String,
    pub description: String,
    /// Initial quantity. Subsequent changes go through the ledger only.
    pub quantity: u32,
    pub location: String,
    pub unit_price: Decimal,
    pub datasheet_link: String,
    pub category: Category,
    pub critical_low_threshold: u32,
}

/// Partial update of a component's descriptive fields.
///
/// Deliberately has no quantity field: quantity is reachable only through the
/// ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPatch {
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub part_number: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub unit_price: Option<Decimal>,
    pub datasheet_link: Option<String>,
    pub category: Option<Category>,
    pub critical_low_threshold: Option<u32>,
}

impl ComponentPatch {
    /// Apply the patch in place, validating the same rules as creation.
    pub fn apply_to(&self, component: &mut Component) -> StockResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(StockError::validation("component name cannot be empty"));
            }
            component.name = name.trim().to_string();
        }
        if let Some(price) = self.unit_price {
            if price.is_sign_negative() {
                return Err(StockError::validation("unit price cannot be negative"));
            }
            component.unit_price = price;
        }
        if let Some(manufacturer) = &self.manufacturer {
            component.manufacturer = manufacturer.clone();
        }
        if let Some(part_number) = &self.part_number {
            component.part_number = part_number.clone();
        }
        if let Some(description) = &self.description {
            component.description = description.clone();
        }
        if let Some(location) = &self.location {
            component.location = location.clone();
        }
        if let Some(datasheet_link) = &self.datasheet_link {
            component.datasheet_link = datasheet_link.clone();
        }
        if let Some(category) = self.category {
            component.category = category;
        }
        if let Some(threshold) = self.critical_low_threshold {
            component.critical_low_threshold = threshold;
        }
        Ok(())
    }
}

/// Catalog list filter: substring search plus category/location narrowing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentFilter {
    /// Case-insensitive match against name, part number, or manufacturer.
    pub search: Option<String>,
    pub category: Option<Category>,
    /// Substring match against the storage location.
    pub location: Option<String>,
}

impl ComponentFilter {
    pub fn matches(&self, component: &Component) -> bool {
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let hit = component.name.to_lowercase().contains(&term)
                || component.part_number.to_lowercase().contains(&term)
                || component.manufacturer.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        if let Some(category) = self.category {
            if component.category != category {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if !component.location.contains(location.as_str()) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, components: &'a [Component]) -> Vec<&'a Component> {
        components.iter().filter(|c| self.matches(c)).collect()
    }
}
