//! Registry domain model.
//!
//! # Responsibility
//! - Define the owner, ship and ship-link records used by core logic.
//! - Own the field rules shared by the boundary and the write paths.
//!
//! # Invariants
//! - Persisted entities are identified by store-generated integer ids.
//! - A `ShipLink` never outlives either of its endpoints.

pub mod entity;
pub mod owner;
pub mod ship;
pub mod validation;
