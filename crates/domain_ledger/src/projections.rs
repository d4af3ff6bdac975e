//! Read-only projections over a ledger snapshot
//!
//! Display-facing derivations: per-category totals, per-participant
//! paid/owed summaries, and member history. All are pure functions of the
//! snapshot; reversing entries carry negative amounts, so voided pairs
//! cancel out of every projection arithmetically.

use core_kernel::{Money, ParticipantId};

use crate::error::LedgerError;
use crate::expense::{ExpenseCategory, ExpenseRecord};
use crate::ledger::TripLedger;

/// Net total spent in one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: Money,
}

/// A participant's paid/owed totals
///
/// `net` is always `paid - owed` and equals the participant's balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantSummary {
    pub participant_id: ParticipantId,
    pub display_name: String,
    pub paid: Money,
    pub owed: Money,
    pub net: Money,
}

/// Net amount spent across the whole ledger
pub fn trip_total(ledger: &TripLedger) -> Result<Money, LedgerError> {
    let total = ledger
        .records()
        .iter()
        .try_fold(Money::zero(ledger.currency()), |acc, r| {
            acc.checked_add(&r.amount)
        })?;
    Ok(total)
}

/// Net totals per category, in category display order
pub fn category_totals(ledger: &TripLedger) -> Result<Vec<CategoryTotal>, LedgerError> {
    ExpenseCategory::ALL
        .iter()
        .map(|&category| {
            let total = ledger
                .records()
                .iter()
                .filter(|r| r.category == category)
                .try_fold(Money::zero(ledger.currency()), |acc, r| {
                    acc.checked_add(&r.amount)
                })?;
            Ok(CategoryTotal { category, total })
        })
        .collect()
}

/// Paid/owed/net summary per participant, in registration order
pub fn participant_summaries(ledger: &TripLedger) -> Result<Vec<ParticipantSummary>, LedgerError> {
    let currency = ledger.currency();
    let mut summaries: Vec<ParticipantSummary> = ledger
        .roster()
        .list()
        .iter()
        .map(|p| ParticipantSummary {
            participant_id: p.id,
            display_name: p.display_name.clone(),
            paid: Money::zero(currency),
            owed: Money::zero(currency),
            net: Money::zero(currency),
        })
        .collect();

    for record in ledger.records() {
        if let Some(pos) = ledger.roster().position(&record.payer) {
            summaries[pos].paid = summaries[pos].paid.checked_add(&record.amount)?;
        }
        for (participant, share) in record.shares()? {
            if let Some(pos) = ledger.roster().position(&participant) {
                summaries[pos].owed = summaries[pos].owed.checked_add(&share)?;
            }
        }
    }

    for summary in &mut summaries {
        summary.net = summary.paid.checked_sub(&summary.owed)?;
    }
    Ok(summaries)
}

/// Records involving the participant, in append order
pub fn history<'a>(
    ledger: &'a TripLedger,
    participant: ParticipantId,
) -> impl Iterator<Item = &'a ExpenseRecord> + 'a {
    ledger
        .records()
        .iter()
        .filter(move |r| r.involves(&participant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use domain_roster::NewParticipant;

    use crate::balance::compute_balances;
    use crate::expense::{NewExpense, SplitPolicy};
    use crate::ledger::TripMeta;

    fn usd(minor: i64) -> Money {
        Money::from_minor(minor, Currency::USD)
    }

    fn sample_trip() -> (TripLedger, Vec<ParticipantId>) {
        let mut ledger = TripLedger::new(TripMeta::new("Kyoto", Currency::USD));
        let ids: Vec<_> = ["Ana", "Ben", "Cho"]
            .iter()
            .map(|n| ledger.register_participant(NewParticipant::named(*n)).unwrap())
            .collect();

        ledger
            .append(NewExpense {
                title: "Ryokan".to_string(),
                payer: ids[0],
                amount: usd(45000),
                category: ExpenseCategory::Accommodation,
                split: SplitPolicy::Equal,
                participants: ids.clone(),
            })
            .unwrap();
        ledger
            .append(NewExpense {
                title: "Sushi".to_string(),
                payer: ids[1],
                amount: usd(12000),
                category: ExpenseCategory::Food,
                split: SplitPolicy::Equal,
                participants: vec![ids[0], ids[1]],
            })
            .unwrap();

        (ledger, ids)
    }

    #[test]
    fn test_trip_total_sums_all_records() {
        let (ledger, _) = sample_trip();
        assert_eq!(trip_total(&ledger).unwrap(), usd(57000));
    }

    #[test]
    fn test_category_totals() {
        let (ledger, _) = sample_trip();
        let totals = category_totals(&ledger).unwrap();

        let by_cat = |c: ExpenseCategory| {
            totals
                .iter()
                .find(|t| t.category == c)
                .map(|t| t.total)
                .unwrap()
        };
        assert_eq!(by_cat(ExpenseCategory::Accommodation), usd(45000));
        assert_eq!(by_cat(ExpenseCategory::Food), usd(12000));
        assert!(by_cat(ExpenseCategory::Transport).is_zero());
    }

    #[test]
    fn test_voided_records_cancel_out_of_totals() {
        let (mut ledger, ids) = sample_trip();
        let id = ledger
            .append(NewExpense {
                title: "Mistake".to_string(),
                payer: ids[2],
                amount: usd(9999),
                category: ExpenseCategory::Other,
                split: SplitPolicy::Equal,
                participants: ids.clone(),
            })
            .unwrap();
        ledger.void(&id).unwrap();

        assert_eq!(trip_total(&ledger).unwrap(), usd(57000));
        let totals = category_totals(&ledger).unwrap();
        let other = totals
            .iter()
            .find(|t| t.category == ExpenseCategory::Other)
            .unwrap();
        assert!(other.total.is_zero());
    }

    #[test]
    fn test_summary_net_equals_balance() {
        let (ledger, ids) = sample_trip();
        let summaries = participant_summaries(&ledger).unwrap();
        let sheet = compute_balances(&ledger).unwrap();

        for (summary, id) in summaries.iter().zip(&ids) {
            assert_eq!(summary.participant_id, *id);
            assert_eq!(summary.net, sheet.get(id));
            assert_eq!(summary.net, summary.paid - summary.owed);
        }
    }

    #[test]
    fn test_history_only_includes_involving_records() {
        let (ledger, ids) = sample_trip();

        // Cho shares the ryokan but not the sushi
        let cho: Vec<_> = history(&ledger, ids[2]).collect();
        assert_eq!(cho.len(), 1);
        assert_eq!(cho[0].title, "Ryokan");

        let ana: Vec<_> = history(&ledger, ids[0]).collect();
        assert_eq!(ana.len(), 2);
    }
}
