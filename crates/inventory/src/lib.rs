//! Inventory domain module.
//!
//! This crate contains business rules for the component catalog and the stock
//! ledger, implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage).

pub mod component;
pub mod movement;

pub use component::{Category, Component, ComponentFilter, ComponentPatch, NewComponent};
pub use movement::{
    MovementDirection, MovementOutcome, MovementRequest, StockTransaction, apply_movement,
    net_quantity,
};
