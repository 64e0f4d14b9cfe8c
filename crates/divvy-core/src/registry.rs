//! # Participant Registry
//!
//! Owns the set of participants and assigns stable identity.
//!
//! Ids are a plain monotonic counter: removing a participant never
//! frees its id, so a stale reference held by the adapter can never
//! silently resolve to a different person. Cascading cleanup of a
//! removed participant's allocations is the [ledger]'s job, invoked by
//! the session immediately after removal.
//!
//! [ledger]: crate::ledger::ItemLedger

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::types::{Participant, ParticipantId};
use crate::validation::validate_participant_name;

/// The set of participants, in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ParticipantRegistry {
    participants: Vec<Participant>,
    next_id: u64,
}

impl ParticipantRegistry {
    /// Creates an empty registry. Session bootstrap adds the first
    /// participant; the registry itself starts with none.
    pub fn new() -> Self {
        ParticipantRegistry {
            participants: Vec::new(),
            next_id: 1,
        }
    }

    /// Adds a participant and returns its id.
    pub fn add(&mut self, name: impl Into<String>) -> ParticipantId {
        let id = ParticipantId::new(self.next_id);
        self.next_id += 1;
        self.participants.push(Participant::new(id, name));
        id
    }

    /// Adds a participant with the default `Friend {id}` name.
    pub fn add_default_named(&mut self) -> ParticipantId {
        let name = format!("Friend {}", self.next_id);
        self.add(name)
    }

    /// Removes a participant. Unknown ids are a silent no-op (a stale
    /// adapter reference, not a fault).
    pub fn remove(&mut self, id: ParticipantId) {
        self.participants.retain(|p| p.id != id);
    }

    /// Renames a participant.
    ///
    /// Fails on an empty-after-trim name; unknown ids are a silent
    /// no-op. The trimmed name is what gets stored.
    pub fn rename(&mut self, id: ParticipantId, new_name: &str) -> CoreResult<()> {
        validate_participant_name(new_name)?;
        if let Some(participant) = self.participants.iter_mut().find(|p| p.id == id) {
            participant.name = new_name.trim().to_string();
        }
        Ok(())
    }

    /// All participants, in insertion order.
    pub fn list(&self) -> &[Participant] {
        &self.participants
    }

    /// Looks up a participant by id.
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Checks whether an id is currently registered.
    pub fn contains(&self, id: ParticipantId) -> bool {
        self.get(id).is_some()
    }

    /// Ids of all current participants, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.participants.iter().map(|p| p.id)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

impl Default for ParticipantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assigns_monotonic_ids() {
        let mut registry = ParticipantRegistry::new();
        let a = registry.add("Alice");
        let b = registry.add("Bob");
        assert_eq!(a.value(), 1);
        assert_eq!(b.value(), 2);
    }

    #[test]
    fn test_removed_ids_are_never_reused() {
        let mut registry = ParticipantRegistry::new();
        let a = registry.add("Alice");
        registry.remove(a);
        let b = registry.add("Bob");
        assert_ne!(a, b);
        assert_eq!(b.value(), 2);
    }

    #[test]
    fn test_default_naming_follows_counter() {
        let mut registry = ParticipantRegistry::new();
        let first = registry.add_default_named();
        assert_eq!(registry.get(first).unwrap().name, "Friend 1");

        registry.add("Alice");
        let third = registry.add_default_named();
        assert_eq!(registry.get(third).unwrap().name, "Friend 3");
    }

    #[test]
    fn test_rename() {
        let mut registry = ParticipantRegistry::new();
        let a = registry.add("Alice");

        registry.rename(a, "  Alicia  ").unwrap();
        assert_eq!(registry.get(a).unwrap().name, "Alicia");

        // Empty-after-trim fails and leaves the name alone
        assert!(registry.rename(a, "   ").is_err());
        assert_eq!(registry.get(a).unwrap().name, "Alicia");
    }

    #[test]
    fn test_rename_unknown_id_is_noop() {
        let mut registry = ParticipantRegistry::new();
        registry.add("Alice");
        assert!(registry.rename(ParticipantId::new(99), "Ghost").is_ok());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut registry = ParticipantRegistry::new();
        registry.add("Alice");
        registry.add("Bob");
        registry.add("Carol");
        let names: Vec<_> = registry.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut registry = ParticipantRegistry::new();
        registry.add("Alice");
        registry.remove(ParticipantId::new(42));
        assert_eq!(registry.len(), 1);
    }
}
