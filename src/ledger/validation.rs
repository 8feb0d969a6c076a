//! Commit-time conflict detection
//!
//! Rules:
//! - First committer wins, decided on the READ set
//! - A key that was absent when read has version 0
//! - Blind writes (write without read) do not conflict
//! - Read-only transactions always validate

use std::collections::BTreeMap;

use super::world_state::WorldState;

/// A key whose committed version moved after the transaction read it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadWriteConflict {
    /// The conflicting key
    pub key: String,
    /// Version recorded in the read set (0 = absent)
    pub read_version: u64,
    /// Latest committed version at validation time (0 = absent)
    pub current_version: u64,
}

/// Outcome of read-set validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// All conflicts, ascending by key
    pub conflicts: Vec<ReadWriteConflict>,
}

impl ValidationResult {
    /// Check if validation passed (no conflicts)
    pub fn is_valid(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// First conflicting key, if any
    pub fn first_conflict(&self) -> Option<&ReadWriteConflict> {
        self.conflicts.first()
    }
}

/// Compares every read-set entry with the latest committed version.
pub fn validate_read_set(read_set: &BTreeMap<String, u64>, state: &WorldState) -> ValidationResult {
    let conflicts = read_set
        .iter()
        .filter_map(|(key, read_version)| {
            let current_version = state
                .latest(key)
                .map_or(0, |v| v.commit_id().value());

            (current_version != *read_version).then(|| ReadWriteConflict {
                key: key.clone(),
                read_version: *read_version,
                current_version,
            })
        })
        .collect();

    ValidationResult { conflicts }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(key: &str) -> WorldState {
        let mut state = WorldState::new();
        let mut writes = BTreeMap::new();
        writes.insert(key.to_string(), b"v".to_vec());
        state.apply(writes).unwrap();
        state
    }

    #[test]
    fn test_unchanged_read_validates() {
        let state = state_with("a");
        let mut read_set = BTreeMap::new();
        read_set.insert("a".to_string(), 1);
        read_set.insert("missing".to_string(), 0);
        assert!(validate_read_set(&read_set, &state).is_valid());
    }

    #[test]
    fn test_absent_then_created_conflicts() {
        let state = state_with("a");
        let mut read_set = BTreeMap::new();
        read_set.insert("a".to_string(), 0);

        let result = validate_read_set(&read_set, &state);
        let conflict = result.first_conflict().unwrap();
        assert_eq!(conflict.key, "a");
        assert_eq!(conflict.read_version, 0);
        assert_eq!(conflict.current_version, 1);
    }

    #[test]
    fn test_empty_read_set_is_valid() {
        let state = state_with("a");
        assert!(validate_read_set(&BTreeMap::new(), &state).is_valid());
    }
}
