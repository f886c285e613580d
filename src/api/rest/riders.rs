use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use tracing::info;

use crate::error::AppError;
use crate::models::rider::{CreateRider, Rider};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/riders", post(create_rider).get(list_riders))
        .route("/riders/:rider_id", get(get_rider))
}

async fn create_rider(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRider>,
) -> Result<Json<Rider>, AppError> {
    if payload.rider_id.trim().is_empty() {
        return Err(AppError::BadRequest("rider_id cannot be empty".to_string()));
    }

    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    let rider = state.store.insert_rider(payload.into_rider()).await?;
    info!(rider_id = %rider.rider_id, "rider created");

    Ok(Json(rider))
}

async fn list_riders(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Rider>>, AppError> {
    Ok(Json(state.store.list_riders().await?))
}

async fn get_rider(
    State(state): State<Arc<AppState>>,
    Path(rider_id): Path<String>,
) -> Result<Json<Rider>, AppError> {
    state
        .store
        .get_rider(&rider_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("rider {} not found", rider_id)))
}
