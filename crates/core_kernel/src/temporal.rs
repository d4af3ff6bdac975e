//! Temporal types for ledger filtering
//!
//! The ledger is an append-only history; queries narrow it by creation
//! time. A [`DateRange`] is half-open: the start is inclusive, the end
//! exclusive, and either bound may be absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid range: start {start} must not be after end {end}")]
    InvalidRange { start: String, end: String },
}

/// A half-open time window used to filter expense records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Start of the range (inclusive), None means unbounded
    pub start: Option<DateTime<Utc>>,
    /// End of the range (exclusive), None means unbounded
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Creates a new range, validating that start precedes end
    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, TemporalError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(TemporalError::InvalidRange {
                    start: start.to_rfc3339(),
                    end: end.to_rfc3339(),
                });
            }
        }
        Ok(Self { start, end })
    }

    /// An unbounded range matching every timestamp
    pub fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// A range from `start` onward
    pub fn from(start: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// A range up to (but excluding) `end`
    pub fn until(end: DateTime<Utc>) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Returns true if the timestamp falls inside the range
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        if let Some(start) = self.start {
            if at < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if at >= end {
                return false;
            }
        }
        true
    }
}
