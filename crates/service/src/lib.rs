//! `labstock-service` — the boundary the presentation collaborator calls.
//!
//! Wires an injected [`EntityStore`](labstock_store::EntityStore) to the
//! ledger, alerting, and reporting engines, and re-checks the capability
//! table before every gated mutation (the UI hiding a control is never the
//! sole enforcement).

pub mod service;

pub use service::InventoryService;

pub use labstock_auth::{Capabilities, Capability, Role, capabilities_for};
