//! Pre-built test data for common scenarios

use core_kernel::{Currency, Money, ParticipantId};
use domain_ledger::{ExpenseCategory, TripLedger};

use crate::builders::{ExpenseBuilder, TripBuilder};

/// Shorthand for USD minor units
pub fn usd(minor: i64) -> Money {
    Money::from_minor(minor, Currency::USD)
}

/// A three-member USD trip with an empty ledger
pub fn lisbon_trio() -> (TripLedger, Vec<ParticipantId>) {
    TripBuilder::new()
        .named("Lisbon")
        .with_members(&["Ana", "Ben", "Cho"])
        .build()
}

/// A trip with a few mixed-category expenses already appended
///
/// Ana paid the hotel ($450 split three ways), Ben the taxi ($60 split
/// three ways), Cho a dinner ($120 split between Ana and Cho).
pub fn trip_with_history() -> (TripLedger, Vec<ParticipantId>) {
    let (mut ledger, ids) = lisbon_trio();

    ledger
        .append(
            ExpenseBuilder::among(&ids)
                .titled("Hotel booking")
                .paid_by(ids[0])
                .amount_minor(45000)
                .category(ExpenseCategory::Accommodation)
                .build(),
        )
        .expect("fixture hotel append failed");
    ledger
        .append(
            ExpenseBuilder::among(&ids)
                .titled("Airport taxi")
                .paid_by(ids[1])
                .amount_minor(6000)
                .category(ExpenseCategory::Transport)
                .build(),
        )
        .expect("fixture taxi append failed");
    ledger
        .append(
            ExpenseBuilder::among(&[ids[0], ids[2]])
                .titled("Dinner at the sushi bar")
                .paid_by(ids[2])
                .amount_minor(12000)
                .category(ExpenseCategory::Food)
                .build(),
        )
        .expect("fixture dinner append failed");

    (ledger, ids)
}
