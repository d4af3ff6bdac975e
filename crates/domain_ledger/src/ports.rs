//! Persistence port for the ledger
//!
//! The engine treats storage as an external collaborator behind a narrow
//! interface: trips, participants, and the append-only expense records are
//! persisted; balances and settlement plans never are - they are always
//! recomputed so they cannot drift from the source of truth.
//!
//! Adapters: [`InMemoryArchive`] here (tests and single-process use) and
//! the PostgreSQL adapter in `infra_db`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use core_kernel::{ParticipantId, TripId};
use domain_roster::Participant;
use thiserror::Error;

use crate::expense::ExpenseRecord;
use crate::ledger::TripMeta;

/// Errors surfaced by archive adapters
///
/// The engine is fail-fast about these: a persistence failure aborts the
/// mutation before the in-memory ledger changes, and no fallback state is
/// ever guessed.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Archive connection error: {0}")]
    Connection(String),

    #[error("Archive query failed: {0}")]
    Query(String),

    #[error("Archive serialization error: {0}")]
    Serialization(String),

    #[error("Not found in archive: {0}")]
    NotFound(String),
}

/// A trip's full persisted state
///
/// Participants come back in registration order and records in append
/// order, which is all [`crate::ledger::TripLedger::rehydrate`] needs.
#[derive(Debug, Clone)]
pub struct ArchivedTrip {
    pub meta: TripMeta,
    pub participants: Vec<Participant>,
    pub records: Vec<ExpenseRecord>,
}

/// Narrow persistence interface the engine writes through
#[async_trait]
pub trait LedgerArchive: Send + Sync {
    /// Persists a newly created trip
    async fn create_trip(&self, meta: &TripMeta) -> Result<(), ArchiveError>;

    /// Persists a registered participant
    async fn record_participant(
        &self,
        trip: TripId,
        participant: &Participant,
    ) -> Result<(), ArchiveError>;

    /// Marks a participant inactive
    async fn deactivate_participant(
        &self,
        trip: TripId,
        participant: ParticipantId,
    ) -> Result<(), ArchiveError>;

    /// Persists an appended expense record (original or reversing)
    async fn record_expense(&self, trip: TripId, record: &ExpenseRecord)
        -> Result<(), ArchiveError>;

    /// Loads a trip's full state, or None if the trip was never created
    async fn load_trip(&self, trip: TripId) -> Result<Option<ArchivedTrip>, ArchiveError>;
}

/// Archive adapter backed by process memory
///
/// Used by tests and by single-process deployments that do not need
/// durability. Mirrors the persisted layout: ordered participant and
/// record lists per trip, nothing derived.
#[derive(Debug, Default)]
pub struct InMemoryArchive {
    trips: Mutex<HashMap<TripId, ArchivedTrip>>,
}

impl InMemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerArchive for InMemoryArchive {
    async fn create_trip(&self, meta: &TripMeta) -> Result<(), ArchiveError> {
        let mut trips = self.trips.lock().expect("archive lock poisoned");
        trips.insert(
            meta.id,
            ArchivedTrip {
                meta: meta.clone(),
                participants: Vec::new(),
                records: Vec::new(),
            },
        );
        Ok(())
    }

    async fn record_participant(
        &self,
        trip: TripId,
        participant: &Participant,
    ) -> Result<(), ArchiveError> {
        let mut trips = self.trips.lock().expect("archive lock poisoned");
        let archived = trips
            .get_mut(&trip)
            .ok_or_else(|| ArchiveError::NotFound(trip.to_string()))?;
        archived.participants.push(participant.clone());
        Ok(())
    }

    async fn deactivate_participant(
        &self,
        trip: TripId,
        participant: ParticipantId,
    ) -> Result<(), ArchiveError> {
        let mut trips = self.trips.lock().expect("archive lock poisoned");
        let archived = trips
            .get_mut(&trip)
            .ok_or_else(|| ArchiveError::NotFound(trip.to_string()))?;
        let entry = archived
            .participants
            .iter_mut()
            .find(|p| p.id == participant)
            .ok_or_else(|| ArchiveError::NotFound(participant.to_string()))?;
        entry.active = false;
        Ok(())
    }

    async fn record_expense(
        &self,
        trip: TripId,
        record: &ExpenseRecord,
    ) -> Result<(), ArchiveError> {
        let mut trips = self.trips.lock().expect("archive lock poisoned");
        let archived = trips
            .get_mut(&trip)
            .ok_or_else(|| ArchiveError::NotFound(trip.to_string()))?;
        archived.records.push(record.clone());
        Ok(())
    }

    async fn load_trip(&self, trip: TripId) -> Result<Option<ArchivedTrip>, ArchiveError> {
        let trips = self.trips.lock().expect("archive lock poisoned");
        Ok(trips.get(&trip).cloned())
    }
}
