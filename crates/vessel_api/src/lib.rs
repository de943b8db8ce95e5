//! HTTP server for the vessel registry.
//!
//! Serves owner and ship resources as JSON over one shared SQLite
//! connection; all relationship rules live in `vessel_core`.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ServerError, ServerResult};
pub use router::build_router;
pub use server::VesselServer;
pub use state::AppState;
