//! Core Kernel - Foundational types for the trip ledger engine
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money backed by integer minor units for exact, drift-free arithmetic
//! - Strongly-typed identifiers for trips, participants, and expense records
//! - Date-range types for ledger filtering

pub mod identifiers;
pub mod money;
pub mod temporal;

pub use identifiers::{ExpenseId, ParticipantId, TripId};
pub use money::{Currency, Money, MoneyError};
pub use temporal::{DateRange, TemporalError};
