//! Bag endpoints.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::{available_volume, consumed_volume};
use serde::{Deserialize, Serialize};
use store::{Bag, BagId, InventoryStore, NewBag};

use super::{SharedState, StatusResponse};
use crate::error::{ApiError, parse_id};

// -- Request types --

/// Body of `POST /bags`. Missing fields are refused by store validation.
#[derive(Debug, Deserialize)]
pub struct CreateBagRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub capacity: i64,
    #[serde(default)]
    pub disabled: bool,
}

impl From<CreateBagRequest> for NewBag {
    fn from(req: CreateBagRequest) -> Self {
        NewBag {
            title: req.title,
            capacity: req.capacity,
            disabled: req.disabled,
        }
    }
}

// -- Response types --

/// A bag with its derived volumes.
#[derive(Debug, Serialize)]
pub struct BagResponse {
    #[serde(flatten)]
    pub bag: Bag,
    pub payload_volume: i128,
    pub available_volume: i128,
}

impl From<Bag> for BagResponse {
    fn from(bag: Bag) -> Self {
        Self {
            payload_volume: consumed_volume(&bag),
            available_volume: available_volume(&bag),
            bag,
        }
    }
}

// -- Handlers --

/// GET /bags — list every bag with its cuboids.
#[tracing::instrument(skip(state))]
pub async fn list<S: InventoryStore + 'static>(
    State(state): State<SharedState<S>>,
) -> Result<Json<Vec<BagResponse>>, ApiError> {
    let bags = state.inventory.list_bags().await?;
    Ok(Json(bags.into_iter().map(BagResponse::from).collect()))
}

/// GET /bags/{bag_id} — load a bag with its cuboids.
#[tracing::instrument(skip(state))]
pub async fn get<S: InventoryStore + 'static>(
    State(state): State<SharedState<S>>,
    Path(bag_id): Path<String>,
) -> Result<Json<BagResponse>, ApiError> {
    let id: BagId = parse_id(&bag_id)?;
    Ok(Json(state.inventory.get_bag(id).await?.into()))
}

/// POST /bags — create an empty bag.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: InventoryStore + 'static>(
    State(state): State<SharedState<S>>,
    payload: Result<Json<CreateBagRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BagResponse>), ApiError> {
    let Json(req) = payload?;
    let bag = state.inventory.create_bag(req.into()).await?;
    Ok((StatusCode::CREATED, Json(bag.into())))
}

/// DELETE /bags/{bag_id} — delete a bag and the cuboids in it.
#[tracing::instrument(skip(state))]
pub async fn delete<S: InventoryStore + 'static>(
    State(state): State<SharedState<S>>,
    Path(bag_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let id: BagId = parse_id(&bag_id)?;
    state.inventory.delete_bag(id).await?;
    Ok(Json(StatusResponse::done()))
}
