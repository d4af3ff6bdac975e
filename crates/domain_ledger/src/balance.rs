//! Balance derivation
//!
//! Balances are never stored: they are a pure function of the ledger
//! snapshot, which is what makes it impossible for them to desynchronize
//! from the records. [`compute_balances`] is the full linear replay;
//! [`IncrementalBalances`] folds in only the records appended since its
//! last refresh, keyed on the ledger's version counter, and always equals
//! the full replay.

use std::collections::HashMap;

use core_kernel::{Currency, Money, MoneyError, ParticipantId};

use crate::error::LedgerError;
use crate::expense::ExpenseRecord;
use crate::ledger::TripLedger;

/// Per-participant net positions in registration order
///
/// Invariant: the entries sum to zero - every unit paid by someone is owed
/// by someone. The settlement solver treats a violation as fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSheet {
    currency: Currency,
    entries: Vec<(ParticipantId, Money)>,
    index: HashMap<ParticipantId, usize>,
}

impl BalanceSheet {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Entries in registration order
    pub fn entries(&self) -> &[(ParticipantId, Money)] {
        &self.entries
    }

    /// A participant's net position; zero if never seen
    pub fn get(&self, id: &ParticipantId) -> Money {
        self.index
            .get(id)
            .map(|&i| self.entries[i].1)
            .unwrap_or_else(|| Money::zero(self.currency))
    }

    /// Sum over all entries; zero for any consistent ledger
    pub fn total(&self) -> Result<Money, MoneyError> {
        self.entries
            .iter()
            .try_fold(Money::zero(self.currency), |acc, (_, m)| acc.checked_add(m))
    }

    fn ensure(&mut self, id: ParticipantId) {
        if !self.index.contains_key(&id) {
            self.index.insert(id, self.entries.len());
            self.entries.push((id, Money::zero(self.currency)));
        }
    }

    fn credit(&mut self, id: ParticipantId, amount: Money) -> Result<(), MoneyError> {
        self.ensure(id);
        let idx = self.index[&id];
        self.entries[idx].1 = self.entries[idx].1.checked_add(&amount)?;
        Ok(())
    }

    fn debit(&mut self, id: ParticipantId, amount: Money) -> Result<(), MoneyError> {
        self.ensure(id);
        let idx = self.index[&id];
        self.entries[idx].1 = self.entries[idx].1.checked_sub(&amount)?;
        Ok(())
    }
}

/// Applies one record: credit the payer, debit each computed share
fn apply_record(sheet: &mut BalanceSheet, record: &ExpenseRecord) -> Result<(), LedgerError> {
    sheet.credit(record.payer, record.amount)?;
    for (participant, share) in record.shares()? {
        sheet.debit(participant, share)?;
    }
    Ok(())
}

/// Derives every participant's net position from a ledger snapshot
///
/// A single pass in ledger order; no hidden state. Known participants
/// appear even when their balance is zero.
pub fn compute_balances(ledger: &TripLedger) -> Result<BalanceSheet, LedgerError> {
    let mut sheet = BalanceSheet::new(ledger.currency());
    for participant in ledger.roster().list() {
        sheet.ensure(participant.id);
    }
    for record in ledger.records() {
        apply_record(&mut sheet, record)?;
    }
    Ok(sheet)
}

/// A balance sheet that refreshes incrementally against a growing ledger
///
/// Caches the last derived sheet together with the ledger version it was
/// derived at. On refresh, only records appended since then are applied.
/// Because records are immutable and ordering is append-only, the result
/// is always identical to a full replay.
#[derive(Debug, Clone)]
pub struct IncrementalBalances {
    sheet: BalanceSheet,
    version: u64,
    records_applied: usize,
}

impl IncrementalBalances {
    pub fn new(currency: Currency) -> Self {
        Self {
            sheet: BalanceSheet::new(currency),
            version: 0,
            records_applied: 0,
        }
    }

    /// The sheet as of the last refresh
    pub fn sheet(&self) -> &BalanceSheet {
        &self.sheet
    }

    /// Brings the sheet up to date with the ledger and returns it
    pub fn refresh(&mut self, ledger: &TripLedger) -> Result<&BalanceSheet, LedgerError> {
        if self.version == ledger.version() {
            return Ok(&self.sheet);
        }

        for participant in ledger.roster().list() {
            self.sheet.ensure(participant.id);
        }
        for record in &ledger.records()[self.records_applied..] {
            apply_record(&mut self.sheet, record)?;
        }

        self.records_applied = ledger.records().len();
        self.version = ledger.version();
        Ok(&self.sheet)
    }
}
