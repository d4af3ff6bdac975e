//! Participant Registry Domain
//!
//! Maps trip members to stable identifiers and supplies the universe over
//! which balances are computed. Participants are never deleted while the
//! ledger references them; marking a member inactive only excludes them
//! from future expense splits, never from historical computation.

pub mod error;
pub mod participant;
pub mod roster;

pub use error::RosterError;
pub use participant::{NewParticipant, Participant};
pub use roster::Roster;
