//! Greedy largest-first settlement solver
//!
//! Repeatedly matches the largest creditor against the largest debtor.
//! Finding the true minimum number of transactions is NP-hard (it embeds
//! subset partitioning), so this is the standard greedy approximation:
//! deterministic, O(n log n), and bounded by n - 1 transactions for n
//! participants with non-zero balances - every match zeroes at least one
//! side, and the final match zeroes both.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use core_kernel::{Money, ParticipantId};
use tracing::error;

use crate::error::SettlementError;
use crate::plan::{SettlementPlan, SettlementTransaction};

/// Heap entry ordered by magnitude, with ties going to the participant
/// registered first. The input slice is in registration order, so the
/// index doubles as both the tie-break key and the participant lookup.
type Entry = (i64, Reverse<usize>);

/// Solves for a settlement plan that zeroes the given balances
///
/// `balances` must be in participant registration order - the solver's
/// tie-break rule (and therefore its determinism) depends on it. Balances
/// that do not sum to exactly zero are an internal-consistency failure:
/// the derivation conserves minor units, so the tolerance is zero.
pub fn solve(balances: &[(ParticipantId, Money)]) -> Result<SettlementPlan, SettlementError> {
    let Some((_, first)) = balances.first() else {
        return Ok(SettlementPlan::default());
    };
    let currency = first.currency();

    let mut total = Money::zero(currency);
    for (_, balance) in balances {
        total = total.checked_add(balance)?;
    }
    if !total.is_zero() {
        error!(total = %total, "balance sheet does not sum to zero; refusing to settle");
        return Err(SettlementError::UnbalancedLedger(total));
    }

    let mut creditors: BinaryHeap<Entry> = BinaryHeap::new();
    let mut debtors: BinaryHeap<Entry> = BinaryHeap::new();
    for (position, (_, balance)) in balances.iter().enumerate() {
        let minor = balance.minor_units();
        if minor > 0 {
            creditors.push((minor, Reverse(position)));
        } else if minor < 0 {
            debtors.push((-minor, Reverse(position)));
        }
    }

    let mut transactions = Vec::new();
    while let (Some((owed, cred_pos)), Some((owes, debt_pos))) =
        (creditors.pop(), debtors.pop())
    {
        let amount = owed.min(owes);
        transactions.push(SettlementTransaction {
            from: balances[debt_pos.0].0,
            to: balances[cred_pos.0].0,
            amount: Money::from_minor(amount, currency),
        });

        if owed > amount {
            creditors.push((owed - amount, cred_pos));
        }
        if owes > amount {
            debtors.push((owes - amount, debt_pos));
        }
    }

    Ok(SettlementPlan { transactions })
}
