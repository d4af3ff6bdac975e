//! Settlement plan types

use core_kernel::{Money, MoneyError, ParticipantId};
use serde::{Deserialize, Serialize};

/// A single recommended payment
///
/// Invariants: `amount` is strictly positive and `from != to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementTransaction {
    /// The debtor making the payment
    pub from: ParticipantId,
    /// The creditor receiving it
    pub to: ParticipantId,
    pub amount: Money,
}

/// An ordered sequence of payments that settles every balance
///
/// Applying all transactions to the balances the plan was solved from
/// drives each of them to exactly zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SettlementPlan {
    pub transactions: Vec<SettlementTransaction>,
}

impl SettlementPlan {
    /// Number of recommended payments
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// True when everyone is already settled
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Applies the plan to a set of balances and returns the result
    ///
    /// A payment moves the payer's balance up (their debt shrinks) and the
    /// receiver's balance down (they are owed less). Used to verify the
    /// settlement-correctness property.
    pub fn apply_to(
        &self,
        balances: &[(ParticipantId, Money)],
    ) -> Result<Vec<(ParticipantId, Money)>, MoneyError> {
        let mut result = balances.to_vec();
        for tx in &self.transactions {
            for (id, balance) in &mut result {
                if *id == tx.from {
                    *balance = balance.checked_add(&tx.amount)?;
                } else if *id == tx.to {
                    *balance = balance.checked_sub(&tx.amount)?;
                }
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;

    fn usd(minor: i64) -> Money {
        Money::from_minor(minor, Currency::USD)
    }

    #[test]
    fn test_apply_to_moves_both_sides_toward_zero() {
        let debtor = ParticipantId::new();
        let creditor = ParticipantId::new();
        let balances = vec![(creditor, usd(3000)), (debtor, usd(-3000))];

        let plan = SettlementPlan {
            transactions: vec![SettlementTransaction {
                from: debtor,
                to: creditor,
                amount: usd(3000),
            }],
        };

        let settled = plan.apply_to(&balances).unwrap();
        assert!(settled.iter().all(|(_, m)| m.is_zero()));
    }

    #[test]
    fn test_empty_plan_is_a_no_op() {
        let id = ParticipantId::new();
        let balances = vec![(id, usd(0))];

        let plan = SettlementPlan::default();
        assert!(plan.is_empty());
        assert_eq!(plan.apply_to(&balances).unwrap(), balances);
    }
}
