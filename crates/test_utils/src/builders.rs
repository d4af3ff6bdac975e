//! Builder patterns for test data construction

use core_kernel::{Currency, Money, ParticipantId};
use domain_ledger::{ExpenseCategory, NewExpense, SplitPolicy, TripLedger, TripMeta, WeightedShare};
use domain_roster::NewParticipant;
use fake::faker::name::en::Name;
use fake::Fake;
use once_cell::sync::Lazy;

/// Fallback member names used when a builder needs more than were given
static GENERATED_NAMES: Lazy<Vec<String>> =
    Lazy::new(|| (0..16).map(|_| Name().fake::<String>()).collect());

/// Builds a trip ledger with a registered roster
///
/// # Example
///
/// ```rust
/// use test_utils::TripBuilder;
///
/// let (ledger, ids) = TripBuilder::new()
///     .named("Lisbon")
///     .with_members(&["Ana", "Ben", "Cho"])
///     .build();
/// assert_eq!(ids.len(), 3);
/// ```
pub struct TripBuilder {
    name: String,
    currency: Currency,
    members: Vec<String>,
}

impl TripBuilder {
    pub fn new() -> Self {
        Self {
            name: "Test Trip".to_string(),
            currency: Currency::USD,
            members: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_members(mut self, names: &[&str]) -> Self {
        self.members = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Registers `count` members with generated display names
    pub fn with_member_count(mut self, count: usize) -> Self {
        self.members = GENERATED_NAMES.iter().take(count).cloned().collect();
        self
    }

    pub fn build(self) -> (TripLedger, Vec<ParticipantId>) {
        let mut ledger = TripLedger::new(TripMeta::new(self.name, self.currency));
        let ids = self
            .members
            .iter()
            .map(|name| {
                ledger
                    .register_participant(NewParticipant::named(name.clone()))
                    .expect("builder member registration failed")
            })
            .collect();
        (ledger, ids)
    }
}

impl Default for TripBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a [`NewExpense`] with sensible defaults
pub struct ExpenseBuilder {
    title: String,
    payer: ParticipantId,
    amount_minor: i64,
    currency: Currency,
    category: ExpenseCategory,
    split: SplitPolicy,
    participants: Vec<ParticipantId>,
}

impl ExpenseBuilder {
    /// Starts an equally-split expense paid by the first participant
    pub fn among(participants: &[ParticipantId]) -> Self {
        Self {
            title: "Shared expense".to_string(),
            payer: participants[0],
            amount_minor: 1000,
            currency: Currency::USD,
            category: ExpenseCategory::Other,
            split: SplitPolicy::Equal,
            participants: participants.to_vec(),
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn paid_by(mut self, payer: ParticipantId) -> Self {
        self.payer = payer;
        self
    }

    pub fn amount_minor(mut self, minor: i64) -> Self {
        self.amount_minor = minor;
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn category(mut self, category: ExpenseCategory) -> Self {
        self.category = category;
        self
    }

    /// Switches to a weighted split with the given (participant, weight) pairs
    pub fn weighted(mut self, weights: &[(ParticipantId, u32)]) -> Self {
        self.split = SplitPolicy::Weighted {
            shares: weights
                .iter()
                .map(|(participant_id, weight)| WeightedShare {
                    participant_id: *participant_id,
                    weight: *weight,
                })
                .collect(),
        };
        self
    }

    pub fn build(self) -> NewExpense {
        NewExpense {
            title: self.title,
            payer: self.payer,
            amount: Money::from_minor(self.amount_minor, self.currency),
            category: self.category,
            split: self.split,
            participants: self.participants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_builder_registers_in_order() {
        let (ledger, ids) = TripBuilder::new().with_members(&["Ana", "Ben"]).build();

        assert_eq!(ledger.roster().len(), 2);
        assert_eq!(ledger.roster().position(&ids[0]), Some(0));
        assert_eq!(ledger.roster().position(&ids[1]), Some(1));
    }

    #[test]
    fn test_generated_members() {
        let (ledger, ids) = TripBuilder::new().with_member_count(5).build();
        assert_eq!(ids.len(), 5);
        assert!(ledger
            .roster()
            .list()
            .iter()
            .all(|p| !p.display_name.is_empty()));
    }

    #[test]
    fn test_expense_builder_round_trips_through_the_ledger() {
        let (mut ledger, ids) = TripBuilder::new().with_members(&["Ana", "Ben"]).build();

        let expense = ExpenseBuilder::among(&ids)
            .titled("Tapas")
            .amount_minor(4200)
            .category(ExpenseCategory::Food)
            .build();

        let id = ledger.append(expense).unwrap();
        assert_eq!(ledger.get(&id).unwrap().title, "Tapas");
    }

    #[test]
    fn test_weighted_expense_builder() {
        let (mut ledger, ids) = TripBuilder::new().with_members(&["Ana", "Ben"]).build();

        let expense = ExpenseBuilder::among(&ids)
            .amount_minor(9000)
            .weighted(&[(ids[0], 2), (ids[1], 1)])
            .build();

        ledger.append(expense).unwrap();
        let shares = ledger.records()[0].shares().unwrap();
        assert_eq!(shares[0].1.minor_units(), 6000);
        assert_eq!(shares[1].1.minor_units(), 3000);
    }
}
