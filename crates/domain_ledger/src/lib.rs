//! Expense Ledger Domain
//!
//! The append-only source of truth for a trip's shared expenses, plus the
//! pure derivations built on top of it:
//!
//! - **Ledger**: ordered, immutable expense records; corrections are
//!   reversing entries, never in-place edits
//! - **Balances**: each participant's net position (paid minus owed),
//!   recomputed from the ledger and never stored independently
//! - **Projections**: read-only views for display (category totals,
//!   per-member summaries and history)
//! - **Service**: per-trip serialized write access with write-through
//!   persistence via the [`ports::LedgerArchive`] port

pub mod balance;
pub mod error;
pub mod expense;
pub mod ledger;
pub mod ports;
pub mod projections;
pub mod service;

pub use balance::{compute_balances, BalanceSheet, IncrementalBalances};
pub use error::LedgerError;
pub use expense::{ExpenseCategory, ExpenseRecord, NewExpense, SplitPolicy, WeightedShare};
pub use ledger::{ExpenseFilter, TripLedger, TripMeta};
pub use ports::{ArchivedTrip, ArchiveError, InMemoryArchive, LedgerArchive};
pub use service::{Page, ServiceError, TripOverview, TripService};
