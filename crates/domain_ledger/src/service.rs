//! Per-trip application service
//!
//! The ledger is the single shared mutable resource, so each trip gets one
//! lock: writes are serialized through it while balance and listing reads
//! run concurrently against a consistent snapshot. Trips never share
//! locks. Mutations write through the archive first and commit to memory
//! only after the write succeeds, so a persistence failure leaves the
//! ledger observably unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use core_kernel::{Currency, ExpenseId, Money, ParticipantId, TripId};
use domain_roster::{NewParticipant, Participant};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info};

use crate::balance::{BalanceSheet, IncrementalBalances};
use crate::error::LedgerError;
use crate::expense::{ExpenseRecord, NewExpense};
use crate::ledger::{ExpenseFilter, TripLedger, TripMeta};
use crate::ports::{ArchiveError, LedgerArchive};
use crate::projections;

/// Errors surfaced by the trip service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Trip not found: {0}")]
    TripNotFound(TripId),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),
}

/// Pagination window for expense listings
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

/// Trip metadata plus headline figures for the dashboard
#[derive(Debug, Clone)]
pub struct TripOverview {
    pub meta: TripMeta,
    pub total_spent: Money,
    pub participant_count: usize,
    pub record_count: usize,
}

struct TripEntry {
    ledger: RwLock<TripLedger>,
    // Balance cache keyed on the ledger version; only new records are
    // folded in on refresh. Guarded separately so readers holding the
    // ledger read lock can update it.
    balances: Mutex<IncrementalBalances>,
}

impl TripEntry {
    fn new(ledger: TripLedger) -> Self {
        let currency = ledger.currency();
        Self {
            ledger: RwLock::new(ledger),
            balances: Mutex::new(IncrementalBalances::new(currency)),
        }
    }
}

/// Owns every loaded trip ledger and its write serialization
pub struct TripService {
    trips: RwLock<HashMap<TripId, Arc<TripEntry>>>,
    archive: Arc<dyn LedgerArchive>,
}

impl TripService {
    pub fn new(archive: Arc<dyn LedgerArchive>) -> Self {
        Self {
            trips: RwLock::new(HashMap::new()),
            archive,
        }
    }

    /// Creates a trip, persists it, and makes it available for appends
    pub async fn create_trip(
        &self,
        name: impl Into<String>,
        currency: Currency,
    ) -> Result<TripMeta, ServiceError> {
        let meta = TripMeta::new(name, currency);
        self.archive.create_trip(&meta).await?;

        let entry = Arc::new(TripEntry::new(TripLedger::new(meta.clone())));
        self.trips.write().await.insert(meta.id, entry);

        info!(trip = %meta.id, currency = %meta.currency, "trip created");
        Ok(meta)
    }

    /// Registers a participant on the trip
    pub async fn register_participant(
        &self,
        trip: TripId,
        new: NewParticipant,
    ) -> Result<ParticipantId, ServiceError> {
        let entry = self.entry(trip).await?;
        let mut ledger = entry.ledger.write().await;

        let participant = ledger.build_participant(new)?;
        self.archive.record_participant(trip, &participant).await?;

        let id = participant.id;
        ledger.commit_participant(participant)?;
        info!(trip = %trip, participant = %id, "participant registered");
        Ok(id)
    }

    /// Soft-removes a participant from future expense splits
    pub async fn deactivate_participant(
        &self,
        trip: TripId,
        participant: ParticipantId,
    ) -> Result<(), ServiceError> {
        let entry = self.entry(trip).await?;
        let mut ledger = entry.ledger.write().await;

        // Validate locally before touching the archive.
        if !ledger.roster().exists(&participant) {
            return Err(LedgerError::UnknownParticipant(participant).into());
        }
        self.archive.deactivate_participant(trip, participant).await?;
        ledger.deactivate_participant(&participant)?;
        Ok(())
    }

    /// Validates, persists, and appends an expense
    pub async fn add_expense(
        &self,
        trip: TripId,
        new: NewExpense,
    ) -> Result<ExpenseId, ServiceError> {
        let entry = self.entry(trip).await?;
        let mut ledger = entry.ledger.write().await;

        let record = ledger.prepare_append(new)?;
        self.archive.record_expense(trip, &record).await?;

        let id = ledger.commit(record);
        info!(trip = %trip, expense = %id, version = ledger.version(), "expense appended");
        Ok(id)
    }

    /// Voids an expense by appending its reversing entry
    pub async fn void_expense(
        &self,
        trip: TripId,
        expense: ExpenseId,
    ) -> Result<ExpenseId, ServiceError> {
        let entry = self.entry(trip).await?;
        let mut ledger = entry.ledger.write().await;

        let reversal = ledger.prepare_void(&expense)?;
        self.archive.record_expense(trip, &reversal).await?;

        let id = ledger.commit(reversal);
        info!(trip = %trip, voided = %expense, reversal = %id, "expense voided");
        Ok(id)
    }

    /// Current per-participant net balances
    pub async fn balances(&self, trip: TripId) -> Result<BalanceSheet, ServiceError> {
        let entry = self.entry(trip).await?;
        let ledger = entry.ledger.read().await;
        let mut cache = entry.balances.lock().await;

        let sheet = cache.refresh(&ledger).map_err(|e| {
            // A derivation failure here means corrupted records, not bad input.
            error!(trip = %trip, error = %e, "balance derivation failed");
            e
        })?;
        Ok(sheet.clone())
    }

    /// Participants in registration order
    pub async fn participants(&self, trip: TripId) -> Result<Vec<Participant>, ServiceError> {
        let entry = self.entry(trip).await?;
        let ledger = entry.ledger.read().await;
        Ok(ledger.roster().list().to_vec())
    }

    /// Filtered, paginated expense listing plus the total match count
    pub async fn expenses(
        &self,
        trip: TripId,
        filter: &ExpenseFilter,
        page: Page,
    ) -> Result<(Vec<ExpenseRecord>, usize), ServiceError> {
        let entry = self.entry(trip).await?;
        let ledger = entry.ledger.read().await;

        let total = ledger.iter(filter).count();
        let records = ledger
            .iter(filter)
            .skip(page.offset)
            .take(page.limit)
            .cloned()
            .collect();
        Ok((records, total))
    }

    /// Trip metadata with headline totals
    pub async fn overview(&self, trip: TripId) -> Result<TripOverview, ServiceError> {
        let entry = self.entry(trip).await?;
        let ledger = entry.ledger.read().await;

        Ok(TripOverview {
            meta: ledger.meta().clone(),
            total_spent: projections::trip_total(&ledger)?,
            participant_count: ledger.roster().len(),
            record_count: ledger.records().len(),
        })
    }

    /// Category totals for the trip
    pub async fn category_totals(
        &self,
        trip: TripId,
    ) -> Result<Vec<projections::CategoryTotal>, ServiceError> {
        let entry = self.entry(trip).await?;
        let ledger = entry.ledger.read().await;
        Ok(projections::category_totals(&ledger)?)
    }

    /// Paid/owed/net summaries for the trip
    pub async fn participant_summaries(
        &self,
        trip: TripId,
    ) -> Result<Vec<projections::ParticipantSummary>, ServiceError> {
        let entry = self.entry(trip).await?;
        let ledger = entry.ledger.read().await;
        Ok(projections::participant_summaries(&ledger)?)
    }

    /// Returns the trip's entry, lazily loading it from the archive
    async fn entry(&self, trip: TripId) -> Result<Arc<TripEntry>, ServiceError> {
        if let Some(entry) = self.trips.read().await.get(&trip) {
            return Ok(entry.clone());
        }

        let archived = self
            .archive
            .load_trip(trip)
            .await?
            .ok_or(ServiceError::TripNotFound(trip))?;
        let ledger = TripLedger::rehydrate(archived.meta, archived.participants, archived.records)?;

        let mut trips = self.trips.write().await;
        let entry = trips
            .entry(trip)
            .or_insert_with(|| Arc::new(TripEntry::new(ledger)));
        Ok(entry.clone())
    }
}
