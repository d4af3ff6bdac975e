//! Ledger domain errors

use core_kernel::{Currency, ExpenseId, MoneyError, ParticipantId};
use domain_roster::RosterError;
use thiserror::Error;

/// Errors that can occur in the ledger domain
///
/// Validation variants are raised before any mutation, so a failed append
/// or void always leaves the ledger exactly as it was.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Payer or split member is not in the trip's registry
    #[error("Unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    /// Participant was soft-removed and cannot join new expenses
    #[error("Inactive participant: {0}")]
    InactiveParticipant(ParticipantId),

    /// Amount is not strictly positive
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Expense currency differs from the trip ledger's currency
    #[error("Currency mismatch: expense in {found} but the trip ledger is {expected}")]
    CurrencyMismatch { expected: Currency, found: Currency },

    /// Split policy violates its invariants
    #[error("Malformed split: {0}")]
    MalformedSplit(String),

    /// Expense record does not exist
    #[error("Expense record not found: {0}")]
    NotFound(ExpenseId),

    /// Record already has a reversing entry
    #[error("Expense record already voided: {0}")]
    AlreadyVoided(ExpenseId),

    /// Arithmetic failure bubbled up from Money
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Registry failure bubbled up from the roster
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),
}

impl LedgerError {
    /// Returns true for caller mistakes that are rejected before mutation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::UnknownParticipant(_)
                | LedgerError::InactiveParticipant(_)
                | LedgerError::InvalidAmount(_)
                | LedgerError::CurrencyMismatch { .. }
                | LedgerError::MalformedSplit(_)
                | LedgerError::Roster(RosterError::Validation(_))
        )
    }
}
