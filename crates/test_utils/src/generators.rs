//! Property-based test data generators

use core_kernel::{Currency, Money, ParticipantId};
use proptest::prelude::*;

/// Strategy for realistic expense amounts in minor units
pub fn expense_minor_units() -> impl Strategy<Value = i64> {
    1i64..5_000_000
}

/// Strategy for a list of minor-unit values that sums to exactly zero
///
/// Generates arbitrary values, then appends the correcting entry, which
/// mirrors how the ledger conserves every unit it splits.
pub fn balanced_minor_units(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(-1_000_000i64..1_000_000, 1..max_len).prop_map(|mut values| {
        let correction: i64 = values.iter().sum();
        values.push(-correction);
        values
    })
}

/// Strategy for a balanced sheet of (participant, balance) pairs
pub fn balanced_balances(max_len: usize) -> impl Strategy<Value = Vec<(ParticipantId, Money)>> {
    balanced_minor_units(max_len).prop_map(|minors| {
        minors
            .into_iter()
            .map(|m| (ParticipantId::new(), Money::from_minor(m, Currency::USD)))
            .collect()
    })
}

/// Strategy for weighted-split weights (at least one non-zero)
pub fn split_weights(max_len: usize) -> impl Strategy<Value = Vec<u64>> {
    proptest::collection::vec(0u64..100, 1..max_len)
        .prop_filter("weights must not all be zero", |w| {
            w.iter().any(|&x| x > 0)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn expense_amounts_are_strictly_positive(minor in expense_minor_units()) {
            prop_assert!(minor > 0);
        }

        #[test]
        fn balanced_minor_units_always_sum_to_zero(values in balanced_minor_units(20)) {
            prop_assert_eq!(values.iter().sum::<i64>(), 0);
        }

        #[test]
        fn balanced_balances_conserve(balances in balanced_balances(20)) {
            let total: i64 = balances.iter().map(|(_, m)| m.minor_units()).sum();
            prop_assert_eq!(total, 0);
        }

        #[test]
        fn split_weights_are_usable(weights in split_weights(10)) {
            let money = Money::from_minor(10_000, Currency::USD);
            let shares = money.split_weighted(&weights).unwrap();
            prop_assert_eq!(
                shares.iter().map(Money::minor_units).sum::<i64>(),
                10_000
            );
        }
    }
}
