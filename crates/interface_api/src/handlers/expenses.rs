//! Expense ledger handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use core_kernel::{DateRange, ExpenseId, Money, ParticipantId, TripId};
use domain_ledger::{ExpenseFilter, NewExpense, Page};
use uuid::Uuid;
use validator::Validate;

use crate::dto::expenses::{
    CreateExpenseRequest, ExpenseCreatedResponse, ExpenseListResponse, ExpenseResponse,
    ExpenseVoidedResponse, ListExpensesQuery,
};
use crate::error::ApiError;
use crate::AppState;

const MAX_PAGE_SIZE: usize = 200;

/// Appends an expense to the trip ledger
pub async fn create_expense(
    State(state): State<AppState>,
    Path(trip): Path<Uuid>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<Json<ExpenseCreatedResponse>, ApiError> {
    request.validate()?;

    let amount = Money::from_major(request.amount, request.currency)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let id = state
        .service
        .add_expense(
            TripId::from(trip),
            NewExpense {
                title: request.title,
                payer: request.payer,
                amount,
                category: request.category,
                split: request.split,
                participants: request.participants,
            },
        )
        .await?;

    Ok(Json(ExpenseCreatedResponse { id: id.into() }))
}

/// Voids an expense by appending its reversing entry
pub async fn void_expense(
    State(state): State<AppState>,
    Path((trip, record)): Path<(Uuid, Uuid)>,
) -> Result<Json<ExpenseVoidedResponse>, ApiError> {
    let reversal = state
        .service
        .void_expense(TripId::from(trip), ExpenseId::from(record))
        .await?;

    Ok(Json(ExpenseVoidedResponse {
        voided: record,
        reversal: reversal.into(),
    }))
}

/// Filterable, paginated ledger listing in append order
pub async fn list_expenses(
    State(state): State<AppState>,
    Path(trip): Path<Uuid>,
    Query(query): Query<ListExpensesQuery>,
) -> Result<Json<ExpenseListResponse>, ApiError> {
    let range = match (query.from, query.to) {
        (None, None) => None,
        (from, to) => Some(
            DateRange::new(from, to).map_err(|e| ApiError::Validation(e.to_string()))?,
        ),
    };

    let filter = ExpenseFilter {
        participant: query.participant.map(ParticipantId::from),
        category: query.category,
        range,
    };
    let page = Page {
        limit: query.limit.unwrap_or(50).min(MAX_PAGE_SIZE),
        offset: query.offset.unwrap_or(0),
    };

    let (records, total) = state
        .service
        .expenses(TripId::from(trip), &filter, page)
        .await?;

    Ok(Json(ExpenseListResponse {
        expenses: records.into_iter().map(ExpenseResponse::from).collect(),
        total,
        limit: page.limit,
        offset: page.offset,
    }))
}
