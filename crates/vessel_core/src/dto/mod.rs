//! Wire transfer shapes for the HTTP boundary and the client.
//!
//! # Responsibility
//! - Define camelCase JSON request/response bodies.
//! - Turn request bodies into validated drafts before any core logic runs.
//!
//! # Invariants
//! - Responses are built field by field from model records.
//! - Missing request fields deserialize to empty values and are rejected by
//!   validation, never by the JSON decoder.

mod owner;
mod ship;

pub use owner::{CreateOwnerRequest, OwnerDto};
pub use ship::{CreateShipRequest, ShipDetailsDto, ShipDto, UpdateShipRequest};
