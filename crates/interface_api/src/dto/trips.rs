//! Trip DTOs

use chrono::{DateTime, Utc};
use core_kernel::Currency;
use domain_ledger::projections::{CategoryTotal, ParticipantSummary};
use domain_ledger::{ExpenseCategory, TripMeta, TripOverview};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTripRequest {
    #[validate(length(min = 1, max = 120, message = "trip name must be 1-120 characters"))]
    pub name: String,
    pub currency: Currency,
}

#[derive(Debug, Serialize)]
pub struct TripCreatedResponse {
    pub id: Uuid,
    pub name: String,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

impl From<TripMeta> for TripCreatedResponse {
    fn from(meta: TripMeta) -> Self {
        Self {
            id: meta.id.into(),
            name: meta.name,
            currency: meta.currency,
            created_at: meta.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryTotalResponse {
    pub category: ExpenseCategory,
    pub total: Decimal,
}

impl From<CategoryTotal> for CategoryTotalResponse {
    fn from(total: CategoryTotal) -> Self {
        Self {
            category: total.category,
            total: total.total.to_decimal(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ParticipantSummaryResponse {
    pub participant_id: Uuid,
    pub display_name: String,
    pub paid: Decimal,
    pub owed: Decimal,
    pub net: Decimal,
}

impl From<ParticipantSummary> for ParticipantSummaryResponse {
    fn from(summary: ParticipantSummary) -> Self {
        Self {
            participant_id: summary.participant_id.into(),
            display_name: summary.display_name,
            paid: summary.paid.to_decimal(),
            owed: summary.owed.to_decimal(),
            net: summary.net.to_decimal(),
        }
    }
}

/// Trip metadata plus the dashboard projections: headline totals,
/// per-category spend, and per-member paid/owed summaries
#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub id: Uuid,
    pub name: String,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub total_spent: Decimal,
    pub participant_count: usize,
    pub expense_count: usize,
    pub category_totals: Vec<CategoryTotalResponse>,
    pub members: Vec<ParticipantSummaryResponse>,
}

impl TripResponse {
    pub fn assemble(
        overview: TripOverview,
        category_totals: Vec<CategoryTotal>,
        summaries: Vec<ParticipantSummary>,
    ) -> Self {
        Self {
            id: overview.meta.id.into(),
            name: overview.meta.name,
            currency: overview.meta.currency,
            created_at: overview.meta.created_at,
            total_spent: overview.total_spent.to_decimal(),
            participant_count: overview.participant_count,
            expense_count: overview.record_count,
            category_totals: category_totals.into_iter().map(Into::into).collect(),
            members: summaries.into_iter().map(Into::into).collect(),
        }
    }
}
