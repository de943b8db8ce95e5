use crate::config::ApiConfig;
use crate::error::ServerResult;
use crate::router::build_router;
use crate::state::AppState;
use log::info;
use rusqlite::Connection;
use std::sync::Arc;
use tokio::net::TcpListener;
use vessel_core::{open_db, open_db_in_memory, seed_sample_fleet, SeedOutcome};

/// Vessel registry HTTP server.
pub struct VesselServer {
    config: ApiConfig,
    state: Arc<AppState>,
}

impl VesselServer {
    /// Opens the configured database and seeds it when requested.
    pub fn new(config: ApiConfig) -> ServerResult<Self> {
        let conn = match &config.database_path {
            Some(path) => open_db(path)?,
            None => open_db_in_memory()?,
        };
        Self::with_connection(config, conn)
    }

    /// Builds a server around an already opened connection.
    pub fn with_connection(config: ApiConfig, conn: Connection) -> ServerResult<Self> {
        if config.seed_sample_data && seed_sample_fleet(&conn)? == SeedOutcome::Seeded {
            info!("event=server_seed module=api status=ok");
        }
        Ok(Self {
            config,
            state: Arc::new(AppState::new(conn)),
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.state))
    }

    /// Binds the configured address and serves requests.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve_on(listener).await
    }

    /// Serves requests on an already bound listener.
    pub async fn serve_on(self, listener: TcpListener) -> ServerResult<()> {
        let app = self.router();
        info!(
            "event=server_listen module=api status=ok addr={}",
            listener.local_addr()?
        );
        axum::serve(listener, app).await?;
        Ok(())
    }
}
