//! Core domain logic for the vessel registry.
//! This crate is the single source of truth for owner/ship relationship
//! invariants; the HTTP server and the client build on it.

pub mod db;
pub mod dto;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, seed_sample_fleet, DbError, SeedOutcome};
pub use logging::{default_log_level, init_logging, logging_status, LogSink};
pub use model::entity::EntityKind;
pub use model::owner::{Owner, OwnerDraft, OwnerId};
pub use model::ship::{Ship, ShipDetails, ShipDraft, ShipId, ShipLink};
pub use model::validation::ValidationError;
pub use repo::owner_repo::{OwnerRepository, SqliteOwnerRepository};
pub use repo::ship_repo::{LinkedInsert, ShipRepository, SqliteShipRepository};
pub use repo::{RepoError, RepoResult};
pub use service::owner_service::OwnerService;
pub use service::ship_service::ShipService;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
