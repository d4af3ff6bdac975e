//! The append-only trip ledger

use chrono::{DateTime, Utc};
use core_kernel::{Currency, DateRange, ExpenseId, ParticipantId, TripId};
use domain_roster::{NewParticipant, Participant, Roster};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::expense::{ExpenseCategory, ExpenseRecord, NewExpense};

/// Identity and fixed properties of a trip
///
/// The currency is fixed at creation; every expense on the ledger must be
/// denominated in it (multi-currency conversion is out of scope).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripMeta {
    pub id: TripId,
    pub name: String,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

impl TripMeta {
    pub fn new(name: impl Into<String>, currency: Currency) -> Self {
        Self {
            id: TripId::new_v7(),
            name: name.into(),
            currency,
            created_at: Utc::now(),
        }
    }
}

/// Optional criteria for listing expense records
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Match records the participant paid for or shares
    pub participant: Option<ParticipantId>,
    pub category: Option<ExpenseCategory>,
    pub range: Option<DateRange>,
}

impl ExpenseFilter {
    pub fn by_participant(id: ParticipantId) -> Self {
        Self {
            participant: Some(id),
            ..Default::default()
        }
    }

    pub fn by_category(category: ExpenseCategory) -> Self {
        Self {
            category: Some(category),
            ..Default::default()
        }
    }

    pub fn within(range: DateRange) -> Self {
        Self {
            range: Some(range),
            ..Default::default()
        }
    }

    /// Returns true if the record satisfies every present criterion
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        if let Some(participant) = &self.participant {
            if !record.involves(participant) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if record.category != category {
                return false;
            }
        }
        if let Some(range) = &self.range {
            if !range.contains(record.created_at) {
                return false;
            }
        }
        true
    }
}

/// One trip's expense ledger and its participant registry
///
/// # Invariants
///
/// - Records are append-only; order is append order and authoritative
/// - Every referenced participant exists in the roster
/// - The version counter advances on every mutation, letting derived
///   views detect staleness and recompute incrementally
#[derive(Debug, Clone)]
pub struct TripLedger {
    meta: TripMeta,
    roster: Roster,
    records: Vec<ExpenseRecord>,
    version: u64,
}

impl TripLedger {
    /// Creates an empty ledger for a new trip
    pub fn new(meta: TripMeta) -> Self {
        Self {
            meta,
            roster: Roster::new(),
            records: Vec::new(),
            version: 0,
        }
    }

    /// Rebuilds a ledger from archived state
    ///
    /// Participants must be supplied in registration order and records in
    /// append order - the archive preserves both.
    pub fn rehydrate(
        meta: TripMeta,
        participants: Vec<Participant>,
        records: Vec<ExpenseRecord>,
    ) -> Result<Self, LedgerError> {
        let mut roster = Roster::new();
        for participant in participants {
            roster.insert(participant)?;
        }
        let version = (roster.len() + records.len()) as u64;
        Ok(Self {
            meta,
            roster,
            records,
            version,
        })
    }

    pub fn meta(&self) -> &TripMeta {
        &self.meta
    }

    pub fn currency(&self) -> Currency {
        self.meta.currency
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Monotonic counter advanced by every mutation
    pub fn version(&self) -> u64 {
        self.version
    }

    /// All records in append order
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// Looks up a record by id
    pub fn get(&self, id: &ExpenseId) -> Option<&ExpenseRecord> {
        self.records.iter().find(|r| r.id == *id)
    }

    /// Returns true if a reversing entry for the record exists
    pub fn is_voided(&self, id: &ExpenseId) -> bool {
        self.records.iter().any(|r| r.reverses == Some(*id))
    }

    /// Lazily iterates records matching the filter, in append order
    ///
    /// The iterator borrows the ledger; calling again restarts from the
    /// beginning.
    pub fn iter<'a>(
        &'a self,
        filter: &'a ExpenseFilter,
    ) -> impl Iterator<Item = &'a ExpenseRecord> + 'a {
        self.records.iter().filter(move |r| filter.matches(r))
    }

    /// Validates and builds a participant without committing it
    pub fn build_participant(&self, new: NewParticipant) -> Result<Participant, LedgerError> {
        Ok(self.roster.build(new)?)
    }

    /// Commits a built participant to the roster
    pub fn commit_participant(&mut self, participant: Participant) -> Result<(), LedgerError> {
        self.roster.insert(participant)?;
        self.version += 1;
        Ok(())
    }

    /// Registers a participant in one step (validate, build, commit)
    pub fn register_participant(
        &mut self,
        new: NewParticipant,
    ) -> Result<ParticipantId, LedgerError> {
        let participant = self.build_participant(new)?;
        let id = participant.id;
        self.commit_participant(participant)?;
        Ok(id)
    }

    /// Soft-removes a participant from future splits
    pub fn deactivate_participant(&mut self, id: &ParticipantId) -> Result<(), LedgerError> {
        self.roster.deactivate(id)?;
        self.version += 1;
        Ok(())
    }

    /// Validates an expense and builds the record without committing it
    ///
    /// The two-phase split lets the application service persist the record
    /// between validation and the in-memory commit, so a failed write never
    /// leaves a half-applied mutation behind.
    pub fn prepare_append(&self, new: NewExpense) -> Result<ExpenseRecord, LedgerError> {
        if !new.amount.is_positive() {
            return Err(LedgerError::InvalidAmount(format!(
                "expense amount must be strictly positive, got {}",
                new.amount
            )));
        }
        if new.amount.currency() != self.meta.currency {
            return Err(LedgerError::CurrencyMismatch {
                expected: self.meta.currency,
                found: new.amount.currency(),
            });
        }
        if new.participants.is_empty() {
            return Err(LedgerError::MalformedSplit(
                "an expense needs at least one participant".to_string(),
            ));
        }
        for (i, pid) in new.participants.iter().enumerate() {
            if new.participants[..i].contains(pid) {
                return Err(LedgerError::MalformedSplit(format!(
                    "participant {} listed twice",
                    pid
                )));
            }
        }

        self.require_active(&new.payer)?;
        for pid in &new.participants {
            self.require_active(pid)?;
        }
        new.split.validate(&new.participants)?;

        let record = ExpenseRecord {
            id: ExpenseId::new_v7(),
            title: new.title,
            payer: new.payer,
            amount: new.amount,
            category: new.category,
            split: new.split,
            participants: new.participants,
            created_at: Utc::now(),
            reverses: None,
        };
        // Surfaces any residual split arithmetic problem before commit.
        record.shares()?;
        Ok(record)
    }

    /// Appends a prepared record, advancing the version counter
    pub fn commit(&mut self, record: ExpenseRecord) -> ExpenseId {
        let id = record.id;
        self.records.push(record);
        self.version += 1;
        id
    }

    /// Validates, builds, and appends an expense in one step
    pub fn append(&mut self, new: NewExpense) -> Result<ExpenseId, LedgerError> {
        let record = self.prepare_append(new)?;
        Ok(self.commit(record))
    }

    /// Builds the reversing entry for a record without committing it
    ///
    /// A record can be voided at most once, and reversing entries cannot
    /// themselves be voided - corrections beyond that are fresh appends.
    pub fn prepare_void(&self, id: &ExpenseId) -> Result<ExpenseRecord, LedgerError> {
        let record = self.get(id).ok_or(LedgerError::NotFound(*id))?;
        if record.is_reversal() {
            return Err(LedgerError::NotFound(*id));
        }
        if self.is_voided(id) {
            return Err(LedgerError::AlreadyVoided(*id));
        }
        Ok(record.reversing_entry())
    }

    /// Voids a record by appending its reversing entry
    pub fn void(&mut self, id: &ExpenseId) -> Result<ExpenseId, LedgerError> {
        let reversal = self.prepare_void(id)?;
        Ok(self.commit(reversal))
    }

    fn require_active(&self, id: &ParticipantId) -> Result<(), LedgerError> {
        match self.roster.get(id) {
            None => Err(LedgerError::UnknownParticipant(*id)),
            Some(p) if !p.active => Err(LedgerError::InactiveParticipant(*id)),
            Some(_) => Ok(()),
        }
    }
}
