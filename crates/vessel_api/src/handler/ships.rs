use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json};
use rusqlite::Connection;
use std::sync::Arc;
use vessel_core::dto::{CreateShipRequest, ShipDetailsDto, ShipDto, UpdateShipRequest};
use vessel_core::{
    OwnerId, ShipId, ShipService, SqliteOwnerRepository, SqliteShipRepository,
};

type SqliteShipService<'conn> =
    ShipService<SqliteShipRepository<'conn>, SqliteOwnerRepository<'conn>>;

fn ship_service(conn: &Connection) -> ApiResult<SqliteShipService<'_>> {
    Ok(ShipService::new(
        SqliteShipRepository::try_new(conn)?,
        SqliteOwnerRepository::try_new(conn)?,
    ))
}

pub async fn list_ships(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<ShipDto>>> {
    let ships = state
        .with_conn(|conn| Ok(ship_service(conn)?.list_ships()?))
        .await?;
    Ok(Json(ships.into_iter().map(ShipDto::from).collect()))
}

pub async fn get_ship(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ShipId>,
) -> ApiResult<Json<ShipDetailsDto>> {
    let details = state
        .with_conn(move |conn| Ok(ship_service(conn)?.get_ship_details(id)?))
        .await?;
    Ok(Json(details.into()))
}

pub async fn create_ship(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateShipRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = body?;
    let (draft, owner_ids) = request.into_parts().map_err(ApiError::from)?;
    let details = state
        .with_conn(move |conn| Ok(ship_service(conn)?.create_ship(draft, &owner_ids)?))
        .await?;

    let location = format!("/ships/{}", details.ship.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ShipDetailsDto::from(details)),
    ))
}

pub async fn update_ship(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ShipId>,
    body: Result<Json<UpdateShipRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(request) = body?;
    let draft = request.into_draft().map_err(ApiError::from)?;
    state
        .with_conn(move |conn| {
            ship_service(conn)?.update_ship(id, draft)?;
            Ok(())
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_ship(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ShipId>,
) -> ApiResult<StatusCode> {
    state
        .with_conn(move |conn| Ok(ship_service(conn)?.delete_ship(id)?))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn link_owner(
    State(state): State<Arc<AppState>>,
    Path((id, owner_id)): Path<(ShipId, OwnerId)>,
) -> ApiResult<StatusCode> {
    state
        .with_conn(move |conn| Ok(ship_service(conn)?.link_owner(id, owner_id)?))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unlink_owner(
    State(state): State<Arc<AppState>>,
    Path((id, owner_id)): Path<(ShipId, OwnerId)>,
) -> ApiResult<StatusCode> {
    state
        .with_conn(move |conn| Ok(ship_service(conn)?.unlink_owner(id, owner_id)?))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
