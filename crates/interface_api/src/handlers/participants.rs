//! Participant handlers

use axum::{
    extract::{Path, State},
    Json,
};
use core_kernel::{ParticipantId, TripId};
use uuid::Uuid;

use crate::dto::participants::{
    ParticipantRegisteredResponse, ParticipantResponse, RegisterParticipantRequest,
};
use crate::error::ApiError;
use crate::AppState;

/// Registers a new trip member
pub async fn register_participant(
    State(state): State<AppState>,
    Path(trip): Path<Uuid>,
    Json(request): Json<RegisterParticipantRequest>,
) -> Result<Json<ParticipantRegisteredResponse>, ApiError> {
    let id = state
        .service
        .register_participant(TripId::from(trip), request.into())
        .await?;
    Ok(Json(ParticipantRegisteredResponse { id: id.into() }))
}

/// Lists trip members in registration order
pub async fn list_participants(
    State(state): State<AppState>,
    Path(trip): Path<Uuid>,
) -> Result<Json<Vec<ParticipantResponse>>, ApiError> {
    let participants = state.service.participants(TripId::from(trip)).await?;
    Ok(Json(participants.into_iter().map(Into::into).collect()))
}

/// Soft-removes a member from future expense splits
///
/// The participant stays registered (historical balances still include
/// them); they are only excluded from the splits of new expenses.
pub async fn deactivate_participant(
    State(state): State<AppState>,
    Path((trip, participant)): Path<(Uuid, Uuid)>,
) -> Result<Json<ParticipantRegisteredResponse>, ApiError> {
    state
        .service
        .deactivate_participant(TripId::from(trip), ParticipantId::from(participant))
        .await?;
    Ok(Json(ParticipantRegisteredResponse { id: participant }))
}
