//! Balance and settlement DTOs

use core_kernel::Currency;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct BalanceEntryResponse {
    pub participant_id: Uuid,
    pub display_name: String,
    /// Net position: positive is owed money, negative owes money
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct BalancesResponse {
    pub currency: Currency,
    pub balances: Vec<BalanceEntryResponse>,
}

#[derive(Debug, Serialize)]
pub struct SettlementTransactionResponse {
    pub from: Uuid,
    pub from_name: String,
    pub to: Uuid,
    pub to_name: String,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct SettlementPlanResponse {
    pub currency: Currency,
    pub transactions: Vec<SettlementTransactionResponse>,
}
