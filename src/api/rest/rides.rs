use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use tracing::info;

use crate::error::AppError;
use crate::models::ride::{CreateRide, Ride};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rides", post(create_ride).get(list_rides))
        .route("/rides/:awb", get(get_ride))
}

async fn create_ride(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRide>,
) -> Result<Json<Ride>, AppError> {
    if payload.pickup_address.trim().is_empty() || payload.delivery_address.trim().is_empty() {
        return Err(AppError::BadRequest(
            "pickup_address and delivery_address are required".to_string(),
        ));
    }

    if !payload.price.is_finite() || payload.price < 0.0 {
        return Err(AppError::BadRequest("price must be >= 0".to_string()));
    }

    let ride = state.store.insert_ride(payload.into_ride()).await?;
    info!(awb = %ride.awb, status = %ride.status, "ride created");

    Ok(Json(ride))
}

async fn list_rides(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Ride>>, AppError> {
    Ok(Json(state.store.list_rides().await?))
}

async fn get_ride(
    State(state): State<Arc<AppState>>,
    Path(awb): Path<String>,
) -> Result<Json<Ride>, AppError> {
    state
        .store
        .get_ride(&awb)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Ride not found".to_string()))
}
