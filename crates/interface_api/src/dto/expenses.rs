//! Expense DTOs

use chrono::{DateTime, Utc};
use core_kernel::{Currency, ParticipantId};
use domain_ledger::{ExpenseCategory, ExpenseRecord, SplitPolicy};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExpenseRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    pub payer: ParticipantId,
    /// Major-unit amount, e.g. 45.50; converted to minor units on entry
    pub amount: Decimal,
    pub currency: Currency,
    pub category: ExpenseCategory,
    pub split: SplitPolicy,
    pub participants: Vec<ParticipantId>,
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub id: Uuid,
    pub title: String,
    pub payer: Uuid,
    pub amount: Decimal,
    pub currency: Currency,
    pub category: ExpenseCategory,
    pub split: SplitPolicy,
    pub participants: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    /// Present on reversing entries appended by a void
    pub reverses: Option<Uuid>,
}

impl From<ExpenseRecord> for ExpenseResponse {
    fn from(record: ExpenseRecord) -> Self {
        Self {
            id: record.id.into(),
            title: record.title,
            payer: record.payer.into(),
            amount: record.amount.to_decimal(),
            currency: record.amount.currency(),
            category: record.category,
            split: record.split,
            participants: record.participants.into_iter().map(Uuid::from).collect(),
            created_at: record.created_at,
            reverses: record.reverses.map(Uuid::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExpenseCreatedResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ExpenseVoidedResponse {
    pub voided: Uuid,
    pub reversal: Uuid,
}

/// Query parameters for the ledger listing
#[derive(Debug, Default, Deserialize)]
pub struct ListExpensesQuery {
    pub participant: Option<Uuid>,
    pub category: Option<ExpenseCategory>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<ExpenseResponse>,
    /// Total records matching the filter, before pagination
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}
