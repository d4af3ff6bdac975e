//! Expense records and split policies

use chrono::{DateTime, Utc};
use core_kernel::{ExpenseId, Money, ParticipantId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::LedgerError;

/// Closed set of expense categories
///
/// A tagged variant instead of a free-form string: invalid categories are
/// unrepresentable rather than runtime-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Accommodation,
    Activities,
    Other,
}

impl ExpenseCategory {
    /// All categories in display order
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Accommodation,
        ExpenseCategory::Activities,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Accommodation => "accommodation",
            ExpenseCategory::Activities => "activities",
            ExpenseCategory::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for parsing a category from its stored string form
#[derive(Debug, thiserror::Error)]
#[error("unknown expense category: {0}")]
pub struct UnknownCategory(pub String);

impl std::str::FromStr for ExpenseCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// One participant's weight inside a weighted split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedShare {
    pub participant_id: ParticipantId,
    pub weight: u32,
}

/// How an expense is divided among its participants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Divide evenly; the remainder goes one minor unit at a time to the
    /// first participants in the record's fixed participant order
    Equal,
    /// Divide proportionally to explicit weights; participants without a
    /// weight owe nothing
    Weighted { shares: Vec<WeightedShare> },
}

impl SplitPolicy {
    /// Validates the policy against the record's participant list
    pub fn validate(&self, participants: &[ParticipantId]) -> Result<(), LedgerError> {
        let SplitPolicy::Weighted { shares } = self else {
            return Ok(());
        };

        if shares.is_empty() {
            return Err(LedgerError::MalformedSplit(
                "weighted split declares no shares".to_string(),
            ));
        }

        let members: HashSet<&ParticipantId> = participants.iter().collect();
        let mut seen = HashSet::new();
        for share in shares {
            if share.weight == 0 {
                return Err(LedgerError::MalformedSplit(format!(
                    "zero weight for participant {}",
                    share.participant_id
                )));
            }
            if !members.contains(&share.participant_id) {
                return Err(LedgerError::MalformedSplit(format!(
                    "weight for {} who is not an expense participant",
                    share.participant_id
                )));
            }
            if !seen.insert(share.participant_id) {
                return Err(LedgerError::MalformedSplit(format!(
                    "duplicate weight for participant {}",
                    share.participant_id
                )));
            }
        }
        Ok(())
    }
}

/// Input for appending an expense to the ledger
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub title: String,
    pub payer: ParticipantId,
    pub amount: Money,
    pub category: ExpenseCategory,
    pub split: SplitPolicy,
    /// Ordered set of members sharing the expense; the order is fixed at
    /// creation and drives remainder allocation
    pub participants: Vec<ParticipantId>,
}

/// An immutable entry in the expense ledger
///
/// Records are never edited or deleted; a correction is a new record with
/// the negated amount and `reverses` pointing at the original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub title: String,
    pub payer: ParticipantId,
    pub amount: Money,
    pub category: ExpenseCategory,
    pub split: SplitPolicy,
    pub participants: Vec<ParticipantId>,
    pub created_at: DateTime<Utc>,
    /// Set on reversing entries appended by `void`
    pub reverses: Option<ExpenseId>,
}

impl ExpenseRecord {
    /// Returns true if this record voids another record
    pub fn is_reversal(&self) -> bool {
        self.reverses.is_some()
    }

    /// Returns true if the participant paid for or shares this expense
    pub fn involves(&self, id: &ParticipantId) -> bool {
        self.payer == *id || self.participants.contains(id)
    }

    /// Computes each participant's owed share under the record's split policy
    ///
    /// Shares are returned in participant order and always sum to `amount`
    /// exactly. For weighted splits, participants without a weight get a
    /// zero share.
    pub fn shares(&self) -> Result<Vec<(ParticipantId, Money)>, LedgerError> {
        let amounts = match &self.split {
            SplitPolicy::Equal => self.amount.split_evenly(self.participants.len())?,
            SplitPolicy::Weighted { shares } => {
                let weights: Vec<u64> = self
                    .participants
                    .iter()
                    .map(|pid| {
                        shares
                            .iter()
                            .find(|s| s.participant_id == *pid)
                            .map(|s| u64::from(s.weight))
                            .unwrap_or(0)
                    })
                    .collect();
                self.amount.split_weighted(&weights)?
            }
        };

        Ok(self.participants.iter().copied().zip(amounts).collect())
    }

    /// Builds the reversing entry that voids this record
    ///
    /// The negated amount with an identical split yields exactly negated
    /// shares, so applying both records leaves every balance untouched.
    pub fn reversing_entry(&self) -> ExpenseRecord {
        ExpenseRecord {
            id: ExpenseId::new_v7(),
            title: format!("Void: {}", self.title),
            payer: self.payer,
            amount: -self.amount,
            category: self.category,
            split: self.split.clone(),
            participants: self.participants.clone(),
            created_at: Utc::now(),
            reverses: Some(self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;

    fn record(amount: i64, participants: Vec<ParticipantId>, split: SplitPolicy) -> ExpenseRecord {
        ExpenseRecord {
            id: ExpenseId::new_v7(),
            title: "Dinner".to_string(),
            payer: participants[0],
            amount: Money::from_minor(amount, Currency::USD),
            category: ExpenseCategory::Food,
            split,
            participants,
            created_at: Utc::now(),
            reverses: None,
        }
    }

    #[test]
    fn test_equal_shares_follow_participant_order() {
        let members = vec![
            ParticipantId::new(),
            ParticipantId::new(),
            ParticipantId::new(),
        ];
        let record = record(10000, members.clone(), SplitPolicy::Equal);

        let shares = record.shares().unwrap();
        assert_eq!(shares[0], (members[0], Money::from_minor(3334, Currency::USD)));
        assert_eq!(shares[1], (members[1], Money::from_minor(3333, Currency::USD)));
        assert_eq!(shares[2], (members[2], Money::from_minor(3333, Currency::USD)));
    }

    #[test]
    fn test_weighted_shares_skip_unweighted_members() {
        let members = vec![ParticipantId::new(), ParticipantId::new()];
        let split = SplitPolicy::Weighted {
            shares: vec![WeightedShare {
                participant_id: members[1],
                weight: 1,
            }],
        };
        let record = record(5000, members.clone(), split);

        let shares = record.shares().unwrap();
        assert!(shares[0].1.is_zero());
        assert_eq!(shares[1].1.minor_units(), 5000);
    }

    #[test]
    fn test_split_validation_rejects_outsiders() {
        let members = vec![ParticipantId::new()];
        let split = SplitPolicy::Weighted {
            shares: vec![WeightedShare {
                participant_id: ParticipantId::new(),
                weight: 1,
            }],
        };
        assert!(matches!(
            split.validate(&members),
            Err(LedgerError::MalformedSplit(_))
        ));
    }

    #[test]
    fn test_split_validation_rejects_zero_weight_and_duplicates() {
        let member = ParticipantId::new();

        let zero = SplitPolicy::Weighted {
            shares: vec![WeightedShare {
                participant_id: member,
                weight: 0,
            }],
        };
        assert!(zero.validate(&[member]).is_err());

        let duplicated = SplitPolicy::Weighted {
            shares: vec![
                WeightedShare {
                    participant_id: member,
                    weight: 1,
                },
                WeightedShare {
                    participant_id: member,
                    weight: 2,
                },
            ],
        };
        assert!(duplicated.validate(&[member]).is_err());
    }

    #[test]
    fn test_reversing_entry_negates_every_share() {
        let members = vec![
            ParticipantId::new(),
            ParticipantId::new(),
            ParticipantId::new(),
        ];
        let original = record(10001, members, SplitPolicy::Equal);
        let reversal = original.reversing_entry();

        assert_eq!(reversal.reverses, Some(original.id));
        assert_eq!(reversal.amount, -original.amount);

        let forward = original.shares().unwrap();
        let backward = reversal.shares().unwrap();
        for ((_, f), (_, b)) in forward.iter().zip(&backward) {
            assert_eq!(f.minor_units(), -b.minor_units());
        }
    }

    #[test]
    fn test_category_serializes_as_snake_case() {
        let json = serde_json::to_string(&ExpenseCategory::Accommodation).unwrap();
        assert_eq!(json, "\"accommodation\"");
    }
}
