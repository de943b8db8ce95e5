use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json};
use rusqlite::Connection;
use std::sync::Arc;
use vessel_core::dto::{CreateOwnerRequest, OwnerDto};
use vessel_core::{OwnerId, OwnerService, SqliteOwnerRepository};

fn owner_service(conn: &Connection) -> ApiResult<OwnerService<SqliteOwnerRepository<'_>>> {
    Ok(OwnerService::new(SqliteOwnerRepository::try_new(conn)?))
}

pub async fn list_owners(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<OwnerDto>>> {
    let owners = state
        .with_conn(|conn| Ok(owner_service(conn)?.list_owners()?))
        .await?;
    Ok(Json(owners.into_iter().map(OwnerDto::from).collect()))
}

pub async fn get_owner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<OwnerId>,
) -> ApiResult<Json<OwnerDto>> {
    let owner = state
        .with_conn(move |conn| Ok(owner_service(conn)?.get_owner(id)?))
        .await?;
    Ok(Json(owner.into()))
}

pub async fn create_owner(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateOwnerRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = body?;
    let draft = request.into_draft().map_err(ApiError::from)?;
    let owner = state
        .with_conn(move |conn| Ok(owner_service(conn)?.create_owner(draft)?))
        .await?;

    let location = format!("/owners/{}", owner.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(OwnerDto::from(owner)),
    ))
}

pub async fn delete_owner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<OwnerId>,
) -> ApiResult<StatusCode> {
    state
        .with_conn(move |conn| Ok(owner_service(conn)?.delete_owner(id)?))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
