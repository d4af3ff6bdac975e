//! Participant entity

use chrono::{DateTime, Utc};
use core_kernel::ParticipantId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A trip member
///
/// Immutable once created, apart from the `active` flag which the roster
/// flips on soft removal. The identity provider supplies the display name;
/// the registry owns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Stable identifier, unique within the trip
    pub id: ParticipantId,
    /// Name shown in balances and settlement plans
    pub display_name: String,
    /// Optional contact address supplied by the identity provider
    pub email: Option<String>,
    /// When the member joined the trip
    pub joined_at: DateTime<Utc>,
    /// Inactive members are excluded from future expense splits only
    pub active: bool,
}

/// Validated input for registering a participant
#[derive(Debug, Clone, Validate, Deserialize)]
pub struct NewParticipant {
    #[validate(length(min = 1, max = 120, message = "display name must be 1-120 characters"))]
    pub display_name: String,

    #[validate(email(message = "invalid email address"))]
    pub email: Option<String>,
}

impl NewParticipant {
    /// Convenience constructor for a name-only registration
    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email: None,
        }
    }

    /// Attaches an email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
