//! Shared request state.
//!
//! # Invariants
//! - One SQLite connection serves every request; access is serialized by a
//!   mutex and always happens on the blocking thread pool.
//! - A request that panics while holding the connection does not take the
//!   registry down: the next request recovers the lock. Open transactions
//!   roll back on unwind, so the connection is still consistent.

use crate::error::{ApiError, ApiResult};
use log::warn;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct AppState {
    conn: Mutex<Connection>,
}

impl AppState {
    /// Wraps a migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Runs `work` against the shared connection off the async runtime.
    pub async fn with_conn<T, F>(self: &Arc<Self>, work: F) -> ApiResult<T>
    where
        F: FnOnce(&Connection) -> ApiResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let state = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            let conn = state.lock_conn();
            work(&conn)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("blocking task failed: {err}")))?
    }

    fn lock_conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| {
            warn!("event=conn_lock module=state status=recovered reason=poisoned");
            self.conn.clear_poison();
            poisoned.into_inner()
        })
    }
}
