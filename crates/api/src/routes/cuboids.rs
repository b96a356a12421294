//! Cuboid CRUD endpoints.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::CuboidPatch;
use serde::Deserialize;
use store::{BagId, Cuboid, CuboidId, Dimensions, InventoryStore, NewCuboid};

use super::{SharedState, StatusResponse};
use crate::error::{ApiError, parse_id};

// -- Request types --

/// Body of `POST /cuboids`.
///
/// Missing dimensions default to zero and are then refused by the store's
/// field validation, so the client sees which field is wrong.
#[derive(Debug, Deserialize)]
pub struct CreateCuboidRequest {
    pub bag_id: BagId,
    #[serde(default)]
    pub length: i64,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
}

impl From<CreateCuboidRequest> for NewCuboid {
    fn from(req: CreateCuboidRequest) -> Self {
        NewCuboid::new(
            req.bag_id,
            Dimensions::new(req.length, req.width, req.height),
        )
    }
}

// -- Handlers --

/// GET /cuboids — list every cuboid.
#[tracing::instrument(skip(state))]
pub async fn list<S: InventoryStore + 'static>(
    State(state): State<SharedState<S>>,
) -> Result<Json<Vec<Cuboid>>, ApiError> {
    Ok(Json(state.inventory.list_cuboids().await?))
}

/// GET /cuboids/{cuboid_id} — load a cuboid with its bag.
#[tracing::instrument(skip(state))]
pub async fn get<S: InventoryStore + 'static>(
    State(state): State<SharedState<S>>,
    Path(cuboid_id): Path<String>,
) -> Result<Json<Cuboid>, ApiError> {
    let id: CuboidId = parse_id(&cuboid_id)?;
    Ok(Json(state.inventory.get_cuboid(id).await?))
}

/// POST /cuboids — pack a new cuboid into a bag.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: InventoryStore + 'static>(
    State(state): State<SharedState<S>>,
    payload: Result<Json<CreateCuboidRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Cuboid>), ApiError> {
    let Json(req) = payload?;
    let cuboid = state.inventory.create_cuboid(req.into()).await?;
    Ok((StatusCode::CREATED, Json(cuboid)))
}

/// PUT/PATCH /cuboids/{cuboid_id} — resize a cuboid or move it to another bag.
#[tracing::instrument(skip(state, payload))]
pub async fn update<S: InventoryStore + 'static>(
    State(state): State<SharedState<S>>,
    Path(cuboid_id): Path<String>,
    payload: Result<Json<CuboidPatch>, JsonRejection>,
) -> Result<Json<Cuboid>, ApiError> {
    let id: CuboidId = parse_id(&cuboid_id)?;
    let patch = match payload {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            // an absent cuboid is reported ahead of a malformed body
            state.inventory.get_cuboid(id).await?;
            return Err(rejection.into());
        }
    };
    Ok(Json(state.inventory.update_cuboid(id, patch).await?))
}

/// DELETE /cuboids/{cuboid_id} — remove a cuboid from its bag.
#[tracing::instrument(skip(state))]
pub async fn delete<S: InventoryStore + 'static>(
    State(state): State<SharedState<S>>,
    Path(cuboid_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let id: CuboidId = parse_id(&cuboid_id)?;
    state.inventory.delete_cuboid(id).await?;
    Ok(Json(StatusResponse::done()))
}
