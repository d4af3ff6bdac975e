//! The per-trip participant registry

use std::collections::HashMap;

use chrono::Utc;
use core_kernel::ParticipantId;
use validator::Validate;

use crate::error::RosterError;
use crate::participant::{NewParticipant, Participant};

/// Registry of a trip's members in registration order
///
/// Registration order is authoritative: the ledger uses it to allocate
/// split remainders and the settlement solver uses it to break ties, so
/// the roster never reorders or removes entries.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    participants: Vec<Participant>,
    index: HashMap<ParticipantId, usize>,
}

impl Roster {
    /// Creates an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates input and builds a participant without inserting it
    ///
    /// Used by the application service to persist the member before
    /// committing it to the in-memory roster.
    pub fn build(&self, new: NewParticipant) -> Result<Participant, RosterError> {
        new.validate()?;
        Ok(Participant {
            id: ParticipantId::new_v7(),
            display_name: new.display_name,
            email: new.email,
            joined_at: Utc::now(),
            active: true,
        })
    }

    /// Inserts an already-built participant, preserving registration order
    pub fn insert(&mut self, participant: Participant) -> Result<(), RosterError> {
        if self.index.contains_key(&participant.id) {
            return Err(RosterError::DuplicateId(participant.id));
        }
        self.index.insert(participant.id, self.participants.len());
        self.participants.push(participant);
        Ok(())
    }

    /// Registers a new member and returns the generated identifier
    pub fn register(&mut self, new: NewParticipant) -> Result<ParticipantId, RosterError> {
        let participant = self.build(new)?;
        let id = participant.id;
        self.insert(participant)?;
        Ok(id)
    }

    /// Returns true if the id is registered
    pub fn exists(&self, id: &ParticipantId) -> bool {
        self.index.contains_key(id)
    }

    /// Returns true if the id is registered and not soft-removed
    pub fn is_active(&self, id: &ParticipantId) -> bool {
        self.get(id).map(|p| p.active).unwrap_or(false)
    }

    /// Looks up a participant by id
    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.index.get(id).map(|&i| &self.participants[i])
    }

    /// Returns the zero-based registration position of a participant
    ///
    /// This is the tie-break key for the settlement solver.
    pub fn position(&self, id: &ParticipantId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// All participants in registration order
    pub fn list(&self) -> &[Participant] {
        &self.participants
    }

    /// Number of registered participants, active or not
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Returns true if nobody has registered yet
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Soft-removes a member
    ///
    /// The participant stays in the registry (historical balances still
    /// include them) but is rejected as payer or split member on future
    /// appends.
    pub fn deactivate(&mut self, id: &ParticipantId) -> Result<(), RosterError> {
        let idx = *self.index.get(id).ok_or(RosterError::NotFound(*id))?;
        self.participants[idx].active = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_assigns_sequential_positions() {
        let mut roster = Roster::new();
        let a = roster.register(NewParticipant::named("Ana")).unwrap();
        let b = roster.register(NewParticipant::named("Ben")).unwrap();
        let c = roster.register(NewParticipant::named("Cho")).unwrap();

        assert_eq!(roster.position(&a), Some(0));
        assert_eq!(roster.position(&b), Some(1));
        assert_eq!(roster.position(&c), Some(2));
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let mut roster = Roster::new();
        roster.register(NewParticipant::named("Ana")).unwrap();
        roster.register(NewParticipant::named("Ben")).unwrap();

        let names: Vec<_> = roster.list().iter().map(|p| p.display_name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Ben"]);
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let mut roster = Roster::new();
        let participant = roster.build(NewParticipant::named("Ana")).unwrap();

        roster.insert(participant.clone()).unwrap();
        assert!(matches!(
            roster.insert(participant),
            Err(RosterError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_deactivate_keeps_the_member_listed() {
        let mut roster = Roster::new();
        let id = roster.register(NewParticipant::named("Ana")).unwrap();

        roster.deactivate(&id).unwrap();

        assert!(roster.exists(&id));
        assert!(!roster.is_active(&id));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_deactivate_unknown_member() {
        let mut roster = Roster::new();
        let result = roster.deactivate(&ParticipantId::new());
        assert!(matches!(result, Err(RosterError::NotFound(_))));
    }

    #[test]
    fn test_register_validates_input() {
        let mut roster = Roster::new();
        let result = roster.register(NewParticipant::named(""));
        assert!(matches!(result, Err(RosterError::Validation(_))));
        assert!(roster.is_empty());
    }
}
