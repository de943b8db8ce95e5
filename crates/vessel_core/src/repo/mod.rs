//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define single-entity data access contracts for owners and ships.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Write paths validate drafts before SQL mutations.
//! - Multi-row writes (ship + links) run in one `IMMEDIATE` transaction.
//! - Deletes rely on `ON DELETE CASCADE`; no repository removes link rows
//!   for a deleted endpoint by hand.

mod error;
pub mod owner_repo;
mod schema;
pub mod ship_repo;

pub use error::{RepoError, RepoResult};
