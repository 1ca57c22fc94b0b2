//! `labstock-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. Roles map to
//! fixed capability sets through an exhaustively-matched table; authentication
//! is an equality check against the stored secret.

pub mod account;
pub mod capabilities;
pub mod role;

pub use account::{NewUser, UserAccount, UserPatch, authenticate};
pub use capabilities::{Capabilities, Capability, capabilities_for, require};
pub use role::Role;
