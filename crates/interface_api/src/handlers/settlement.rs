//! Balance and settlement handlers

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use core_kernel::{ParticipantId, TripId};
use domain_settlement::solve;
use uuid::Uuid;

use crate::dto::settlement::{
    BalanceEntryResponse, BalancesResponse, SettlementPlanResponse, SettlementTransactionResponse,
};
use crate::error::ApiError;
use crate::AppState;

async fn display_names(
    state: &AppState,
    trip: TripId,
) -> Result<HashMap<ParticipantId, String>, ApiError> {
    let participants = state.service.participants(trip).await?;
    Ok(participants
        .into_iter()
        .map(|p| (p.id, p.display_name))
        .collect())
}

fn name_of(names: &HashMap<ParticipantId, String>, id: &ParticipantId) -> String {
    names.get(id).cloned().unwrap_or_else(|| id.to_string())
}

/// Current per-participant net balances
pub async fn get_balances(
    State(state): State<AppState>,
    Path(trip): Path<Uuid>,
) -> Result<Json<BalancesResponse>, ApiError> {
    let trip = TripId::from(trip);
    let sheet = state.service.balances(trip).await?;
    let names = display_names(&state, trip).await?;

    Ok(Json(BalancesResponse {
        currency: sheet.currency(),
        balances: sheet
            .entries()
            .iter()
            .map(|(id, amount)| BalanceEntryResponse {
                participant_id: (*id).into(),
                display_name: name_of(&names, id),
                amount: amount.to_decimal(),
            })
            .collect(),
    }))
}

/// Current settlement plan: who pays whom to zero every balance
pub async fn get_settlement(
    State(state): State<AppState>,
    Path(trip): Path<Uuid>,
) -> Result<Json<SettlementPlanResponse>, ApiError> {
    let trip = TripId::from(trip);
    let sheet = state.service.balances(trip).await?;
    let names = display_names(&state, trip).await?;

    let plan = solve(sheet.entries())?;

    Ok(Json(SettlementPlanResponse {
        currency: sheet.currency(),
        transactions: plan
            .transactions
            .into_iter()
            .map(|tx| SettlementTransactionResponse {
                from: tx.from.into(),
                from_name: name_of(&names, &tx.from),
                to: tx.to.into(),
                to_name: name_of(&names, &tx.to),
                amount: tx.amount.to_decimal(),
            })
            .collect(),
    }))
}
