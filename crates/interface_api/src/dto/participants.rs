//! Participant DTOs

use chrono::{DateTime, Utc};
use domain_roster::{NewParticipant, Participant};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RegisterParticipantRequest {
    pub display_name: String,
    pub email: Option<String>,
}

impl From<RegisterParticipantRequest> for NewParticipant {
    fn from(request: RegisterParticipantRequest) -> Self {
        NewParticipant {
            display_name: request.display_name,
            email: request.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ParticipantResponse {
    pub id: Uuid,
    pub display_name: String,
    pub email: Option<String>,
    pub joined_at: DateTime<Utc>,
    pub active: bool,
}

impl From<Participant> for ParticipantResponse {
    fn from(participant: Participant) -> Self {
        Self {
            id: participant.id.into(),
            display_name: participant.display_name,
            email: participant.email,
            joined_at: participant.joined_at,
            active: participant.active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ParticipantRegisteredResponse {
    pub id: Uuid,
}
