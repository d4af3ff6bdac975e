//! Assertion helpers for the engine's core invariants

use core_kernel::{Money, ParticipantId};
use domain_ledger::BalanceSheet;
use domain_settlement::SettlementPlan;

/// Asserts that a Money value is exactly zero
pub fn assert_money_zero(money: &Money) {
    assert!(money.is_zero(), "Expected zero money, got {}", money);
}

/// Asserts the closed-system invariant: balances sum to zero
pub fn assert_conservation(sheet: &BalanceSheet) {
    let total = sheet.total().expect("currency mismatch inside sheet");
    assert!(
        total.is_zero(),
        "Balance sheet violates conservation: sums to {}",
        total
    );
}

/// Asserts that applying the plan drives every balance to exactly zero
pub fn assert_plan_settles(plan: &SettlementPlan, balances: &[(ParticipantId, Money)]) {
    let settled = plan
        .apply_to(balances)
        .expect("currency mismatch applying plan");
    for (id, remaining) in settled {
        assert!(
            remaining.is_zero(),
            "Participant {} left with {} after settlement",
            id,
            remaining
        );
    }
}

/// Asserts the documented bound: at most n - 1 transactions for n
/// participants with non-zero balances
pub fn assert_transaction_bound(plan: &SettlementPlan, balances: &[(ParticipantId, Money)]) {
    let non_zero = balances.iter().filter(|(_, m)| !m.is_zero()).count();
    if non_zero == 0 {
        assert!(plan.is_empty(), "Settled sheet produced transactions");
    } else {
        assert!(
            plan.len() <= non_zero - 1,
            "Plan has {} transactions for {} non-zero balances",
            plan.len(),
            non_zero
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use domain_settlement::solve;

    #[test]
    fn test_assertions_accept_a_valid_plan() {
        let balances = vec![
            (ParticipantId::new(), Money::from_minor(500, Currency::USD)),
            (ParticipantId::new(), Money::from_minor(-500, Currency::USD)),
        ];
        let plan = solve(&balances).unwrap();

        assert_plan_settles(&plan, &balances);
        assert_transaction_bound(&plan, &balances);
    }

    #[test]
    #[should_panic(expected = "left with")]
    fn test_settle_assertion_catches_incomplete_plans() {
        let balances = vec![
            (ParticipantId::new(), Money::from_minor(500, Currency::USD)),
            (ParticipantId::new(), Money::from_minor(-500, Currency::USD)),
        ];
        let empty = SettlementPlan::default();
        assert_plan_settles(&empty, &balances);
    }
}
