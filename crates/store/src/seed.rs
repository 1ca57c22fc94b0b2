//! First-run data: default accounts and a starter catalog.

use chrono::{DateTime, Days, Utc};
use rust_decimal_macros::dec;

use labstock_auth::{NewUser, Role, UserAccount};
use labstock_core::{ComponentId, UserId};
use labstock_inventory::{Category, Component, NewComponent};

use crate::entity_store::{EntityStore, StoreResult};

/// Seed the default accounts and starter catalog when the store is empty.
///
/// Existing data is never overwritten; each collection is seeded
/// independently only if it is empty. Returns whether anything was written.
pub fn seed_if_empty<S: EntityStore>(store: &S, now: DateTime<Utc>) -> StoreResult<bool> {
    let mut seeded = false;

    if store.load_users()?.is_empty() {
        store.save_users(&default_users(now))?;
        tracing::info!("seeded default user accounts");
        seeded = true;
    }

    if store.load_components()?.is_empty() {
        store.save_components(&starter_catalog(now))?;
        tracing::info!("seeded starter component catalog");
        seeded = true;
    }

    Ok(seeded)
}

fn user(username: &str, email: &str, role: Role, password: &str, now: DateTime<Utc>) -> UserAccount {
    UserAccount::create(
        UserId::new(),
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            role,
            password: password.to_string(),
        },
        now,
    )
    .expect("seed account is valid")
}

fn default_users(now: DateTime<Utc>) -> Vec<UserAccount> {
    vec![
        user("admin", "admin@lab.com", Role::Administrator, "admin123", now),
        user("user", "user@lab.com", Role::StandardUser, "user123", now),
        user("lab_tech", "labtech@lab.com", Role::LabTechnician, "tech123", now),
        user("researcher", "researcher@lab.com", Role::Researcher, "research123", now),
        user("mfg_engineer", "mfgeng@lab.com", Role::ManufacturingEngineer, "mfg123", now),
    ]
}

struct SeedComponent {
    name: &'static str,
    manufacturer: &'static str,
    part_number: &'static str,
    description: &'static str,
    quantity: u32,
    location: &'static str,
    unit_price: rust_decimal::Decimal,
    category: Category,
    critical_low_threshold: u32,
    age_days: u64,
    /// Some stale items carry a last outward movement as old as creation.
    stale_outward: bool,
}

fn starter_catalog(now: DateTime<Utc>) -> Vec<Component> {
    let seeds = [
        SeedComponent {
            name: "Resistor (100 Ohm, 1/4W)",
            manufacturer: "Generic",
            part_number: "R100_1/4W",
            description: "Carbon Film, 5% Tolerance",
            quantity: 500,
            location: "R-Shelf-A1",
            unit_price: dec!(0.50),
            category: Category::Resistors,
            critical_low_threshold: 100,
            age_days: 30,
            stale_outward: false,
        },
        SeedComponent {
            name: "Ceramic Cap (0.1uF, 50V)",
            manufacturer: "Generic",
            part_number: "C0.1UF_50V_CER",
            description: "Ceramic Disc Capacitor",
            quantity: 800,
            location: "C-Bin-B1",
            unit_price: dec!(0.80),
            category: Category::Capacitors,
            critical_low_threshold: 200,
            age_days: 20,
            stale_outward: false,
        },
        SeedComponent {
            name: "Electrolytic Cap (100uF, 25V)",
            manufacturer: "Generic",
            part_number: "C100UF_25V_EL",
            description: "Radial Electrolytic Capacitor",
            quantity: 25,
            location: "C-Bin-B2",
            unit_price: dec!(2.50),
            category: Category::Capacitors,
            critical_low_threshold: 50,
            age_days: 120,
            stale_outward: true,
        },
        SeedComponent {
            name: "1N4007 Diode",
            manufacturer: "Fairchild",
            part_number: "1N4007",
            description: "Rectifier Diode, 1A, 1000V",
            quantity: 300,
            location: "D-Bin-D1",
            unit_price: dec!(1.00),
            category: Category::Diodes,
            critical_low_threshold: 75,
            age_days: 40,
            stale_outward: false,
        },
        SeedComponent {
            name: "NPN Transistor (BC547)",
            manufacturer: "NXP",
            part_number: "BC547B",
            description: "NPN BJT, General Purpose",
            quantity: 200,
            location: "T-Tray-E1",
            unit_price: dec!(1.20),
            category: Category::Transistors,
            critical_low_threshold: 50,
            age_days: 35,
            stale_outward: false,
        },
        SeedComponent {
            name: "NE555 Timer IC",
            manufacturer: "Texas Instruments",
            part_number: "NE555P",
            description: "Precision Timer IC",
            quantity: 80,
            location: "IC-Box-F1",
            unit_price: dec!(8.00),
            category: Category::IntegratedCircuits,
            critical_low_threshold: 20,
            age_days: 25,
            stale_outward: false,
        },
        SeedComponent {
            name: "ESP32-WROOM-32U",
            manufacturer: "Espressif",
            part_number: "ESP32-WROOM-32U",
            description: "Wi-Fi & Bluetooth Module",
            quantity: 2,
            location: "IC-Box-F4",
            unit_price: dec!(200.00),
            category: Category::IntegratedCircuits,
            critical_low_threshold: 3,
            age_days: 70,
            stale_outward: false,
        },
        SeedComponent {
            name: "DHT11 Temperature/Humidity",
            manufacturer: "Aosong",
            part_number: "DHT11",
            description: "Digital Temperature & Humidity Sensor",
            quantity: 15,
            location: "Sensor-Bin-H1",
            unit_price: dec!(50.00),
            category: Category::Sensors,
            critical_low_threshold: 3,
            age_days: 30,
            stale_outward: false,
        },
        SeedComponent {
            name: "Jumper Wires (M-M, 40pc)",
            manufacturer: "Generic",
            part_number: "JMP-MM-40",
            description: "Male-to-Male Jumper Wires, assorted",
            quantity: 10,
            location: "Cable-Bag-L1",
            unit_price: dec!(80.00),
            category: Category::CablesWires,
            critical_low_threshold: 2,
            age_days: 25,
            stale_outward: false,
        },
        SeedComponent {
            name: "Breadboard (Full Size)",
            manufacturer: "Generic",
            part_number: "BRDBRD-FULL",
            description: "830 Tie Points",
            quantity: 10,
            location: "Misc-Shelf-N2",
            unit_price: dec!(70.00),
            category: Category::MiscLabSupplies,
            critical_low_threshold: 2,
            age_days: 110,
            stale_outward: true,
        },
    ];

    seeds
        .into_iter()
        .map(|seed| {
            let created_at = now
                .checked_sub_days(Days::new(seed.age_days))
                .unwrap_or(now);
            let mut component = Component::create(
                ComponentId::new(),
                NewComponent {
                    name: seed.name.to_string(),
                    manufacturer: seed.manufacturer.to_string(),
                    part_number: seed.part_number.to_string(),
                    description: seed.description.to_string(),
                    quantity: seed.quantity,
                    location: seed.location.to_string(),
                    unit_price: seed.unit_price,
                    datasheet_link: String::new(),
                    category: seed.category,
                    critical_low_threshold: seed.critical_low_threshold,
                },
                created_at,
            )
            .expect("seed component is valid");
            if seed.stale_outward {
                component.last_outward_at = Some(created_at);
            }
            component
        })
        .collect()
}
