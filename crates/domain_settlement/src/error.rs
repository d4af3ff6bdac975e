//! Settlement domain errors

use core_kernel::{Money, MoneyError};
use thiserror::Error;

/// Errors that can occur while solving for a settlement plan
#[derive(Debug, Error)]
pub enum SettlementError {
    /// The balances do not sum to zero
    ///
    /// With a correct balance calculator this is unreachable: the ledger
    /// conserves every minor unit. Seeing it means a logic defect, so it
    /// is fatal to the request and must never be papered over by clamping.
    #[error("Unbalanced ledger: balances sum to {0}, expected zero")]
    UnbalancedLedger(Money),

    /// Arithmetic failure bubbled up from Money
    #[error(transparent)]
    Money(#[from] MoneyError),
}
