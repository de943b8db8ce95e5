//! Core use-case services.
//!
//! # Responsibility
//! - Validate owner/ship relationship constraints above the repository layer.
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep HTTP/client layers decoupled from storage details.
//!
//! # Invariants
//! - A rejected operation never mutates storage.
//! - Every failure is returned as a named `ServiceError`; nothing is retried.

mod error;
pub mod owner_service;
pub mod ship_service;

pub use error::{ServiceError, ServiceResult};
