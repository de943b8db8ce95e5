use crate::handler::{self, owners, ships};
use crate::state::AppState;
use axum::routing::{get, put};
use axum::Router;
use std::sync::Arc;

/// Build the axum router with all registry endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handler::health_handler))
        .route("/owners", get(owners::list_owners).post(owners::create_owner))
        .route(
            "/owners/:id",
            get(owners::get_owner).delete(owners::delete_owner),
        )
        .route("/ships", get(ships::list_ships).post(ships::create_ship))
        .route(
            "/ships/:id",
            get(ships::get_ship)
                .put(ships::update_ship)
                .delete(ships::delete_ship),
        )
        .route(
            "/ships/:id/owners/:owner_id",
            put(ships::link_owner).delete(ships::unlink_owner),
        )
        .with_state(state)
}
