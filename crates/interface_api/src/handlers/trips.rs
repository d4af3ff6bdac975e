//! Trip handlers

use axum::{
    extract::{Path, State},
    Json,
};
use core_kernel::TripId;
use uuid::Uuid;
use validator::Validate;

use crate::dto::trips::{CreateTripRequest, TripCreatedResponse, TripResponse};
use crate::error::ApiError;
use crate::AppState;

/// Creates a new trip
pub async fn create_trip(
    State(state): State<AppState>,
    Json(request): Json<CreateTripRequest>,
) -> Result<Json<TripCreatedResponse>, ApiError> {
    request.validate()?;

    let meta = state
        .service
        .create_trip(request.name, request.currency)
        .await?;
    Ok(Json(meta.into()))
}

/// Gets a trip's metadata with the dashboard projections
pub async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripResponse>, ApiError> {
    let trip = TripId::from(id);
    let overview = state.service.overview(trip).await?;
    let category_totals = state.service.category_totals(trip).await?;
    let summaries = state.service.participant_summaries(trip).await?;

    Ok(Json(TripResponse::assemble(
        overview,
        category_totals,
        summaries,
    )))
}
