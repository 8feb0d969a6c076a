//! Committed world state: one version chain per key

use std::collections::BTreeMap;

use super::commit::{CommitAuthority, CommitAuthorityError, CommitId, ReadView};
use super::version::{Version, VersionChain};

/// All committed versions, keyed in ascending key order.
///
/// Open read views are counted per upper bound. A key's chain is pruned
/// down to what the oldest open view (or, with none open, the latest
/// commit) can see each time the key is written.
#[derive(Debug, Default)]
pub struct WorldState {
    chains: BTreeMap<String, VersionChain>,
    authority: CommitAuthority,
    open_views: BTreeMap<CommitId, usize>,
}

impl WorldState {
    /// Empty world state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a world state from the latest value of every key.
    ///
    /// Every entry's commit id must be non-zero and at most `highest`.
    pub fn restore(
        highest: CommitId,
        entries: Vec<(String, CommitId, Vec<u8>)>,
    ) -> Result<Self, String> {
        let mut chains = BTreeMap::new();
        for (key, commit_id, value) in entries {
            if commit_id.value() == 0 || commit_id > highest {
                return Err(format!(
                    "key {} carries commit {} outside 1..={}",
                    key,
                    commit_id.value(),
                    highest.value()
                ));
            }
            let mut chain = VersionChain::new();
            chain.push(Version::new(value, commit_id));
            if chains.insert(key.clone(), chain).is_some() {
                return Err(format!("duplicate key {}", key));
            }
        }

        Ok(Self {
            chains,
            authority: CommitAuthority::from_replayed_commit(highest),
            open_views: BTreeMap::new(),
        })
    }

    /// Read view over everything committed so far.
    pub fn current_snapshot(&self) -> ReadView {
        self.authority.current_snapshot()
    }

    /// Opens a read view at the latest commit and keeps its versions alive
    /// until `release_view`.
    pub fn open_view(&mut self) -> ReadView {
        let view = self.current_snapshot();
        *self.open_views.entry(view.upper_bound()).or_insert(0) += 1;
        view
    }

    /// Releases a view returned by `open_view`.
    pub fn release_view(&mut self, view: ReadView) {
        let bound = view.upper_bound();
        if let Some(count) = self.open_views.get_mut(&bound) {
            *count -= 1;
            if *count == 0 {
                self.open_views.remove(&bound);
            }
        }
    }

    /// Number of read views currently open.
    pub fn open_view_count(&self) -> usize {
        self.open_views.values().sum()
    }

    /// Oldest commit any open view can observe.
    pub fn visibility_floor(&self) -> CommitId {
        self.open_views
            .keys()
            .next()
            .copied()
            .unwrap_or_else(|| self.highest_commit_id())
    }

    /// Total versions retained across all keys.
    pub fn version_count(&self) -> usize {
        self.chains.values().map(VersionChain::len).sum()
    }

    /// Highest assigned commit identity.
    pub fn highest_commit_id(&self) -> CommitId {
        self.authority.highest_commit_id()
    }

    /// Version of `key` visible under `view`.
    pub fn visible(&self, key: &str, view: ReadView) -> Option<&Version> {
        self.chains.get(key).and_then(|chain| chain.visible_at(view))
    }

    /// Newest version of `key`, as seen by commit-time validation.
    pub fn latest(&self, key: &str) -> Option<&Version> {
        self.chains.get(key).and_then(VersionChain::latest)
    }

    /// Every key with a version visible under `view`, ascending by key.
    pub fn visible_entries(&self, view: ReadView) -> impl Iterator<Item = (&str, &Version)> {
        self.chains
            .iter()
            .filter_map(move |(key, chain)| chain.visible_at(view).map(|v| (key.as_str(), v)))
    }

    /// Newest version of every key, ascending by key.
    pub fn latest_entries(&self) -> impl Iterator<Item = (&str, &Version)> {
        self.chains
            .iter()
            .filter_map(|(key, chain)| chain.latest().map(|v| (key.as_str(), v)))
    }

    /// Number of keys ever written.
    pub fn key_count(&self) -> usize {
        self.chains.len()
    }

    /// Installs `writes` atomically under the next commit identity.
    pub fn apply(
        &mut self,
        writes: BTreeMap<String, Vec<u8>>,
    ) -> Result<CommitId, CommitAuthorityError> {
        let commit_id = self.authority.next_commit_id();
        self.authority.mark_committed(commit_id)?;

        let floor = self.visibility_floor();
        for (key, value) in writes {
            let chain = self.chains.entry(key).or_default();
            chain.push(Version::new(value, commit_id));
            chain.prune(floor);
        }

        Ok(commit_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writes(pairs: &[(&str, &str)]) -> BTreeMap<String, Vec<u8>> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.as_bytes().to_vec()))
            .collect()
    }

    #[test]
    fn test_apply_assigns_one_commit_to_all_writes() {
        let mut state = WorldState::new();
        let commit = state.apply(writes(&[("a", "1"), ("b", "2")])).unwrap();

        assert_eq!(commit, CommitId::new(1));
        assert_eq!(state.latest("a").unwrap().commit_id(), commit);
        assert_eq!(state.latest("b").unwrap().commit_id(), commit);
    }

    #[test]
    fn test_old_view_does_not_see_later_commits() {
        let mut state = WorldState::new();
        state.apply(writes(&[("a", "1")])).unwrap();
        let view = state.open_view();
        state.apply(writes(&[("a", "2"), ("b", "3")])).unwrap();

        assert_eq!(state.visible("a", view).unwrap().value(), b"1");
        assert!(state.visible("b", view).is_none());
        assert_eq!(state.visible_entries(view).count(), 1);
        assert_eq!(state.latest("a").unwrap().value(), b"2");
    }

    #[test]
    fn test_rewrites_without_open_views_keep_one_version() {
        let mut state = WorldState::new();
        for i in 0..10 {
            state.apply(writes(&[("a", &i.to_string())])).unwrap();
        }
        assert_eq!(state.version_count(), 1);
        assert_eq!(state.latest("a").unwrap().value(), b"9");
    }

    #[test]
    fn test_open_view_pins_its_versions() {
        let mut state = WorldState::new();
        state.apply(writes(&[("a", "1")])).unwrap();
        let view = state.open_view();
        for v in ["2", "3", "4"] {
            state.apply(writes(&[("a", v)])).unwrap();
        }

        assert_eq!(state.visible("a", view).unwrap().value(), b"1");
        assert_eq!(state.visibility_floor(), CommitId::new(1));

        state.release_view(view);
        assert_eq!(state.open_view_count(), 0);
        state.apply(writes(&[("a", "5")])).unwrap();
        assert_eq!(state.version_count(), 1);
    }

    #[test]
    fn test_views_at_same_bound_are_counted() {
        let mut state = WorldState::new();
        let first = state.open_view();
        let second = state.open_view();
        assert_eq!(state.open_view_count(), 2);
        state.release_view(first);
        assert_eq!(state.open_view_count(), 1);
        state.release_view(second);
        assert_eq!(state.open_view_count(), 0);
    }

    #[test]
    fn test_entries_are_key_ordered() {
        let mut state = WorldState::new();
        state.apply(writes(&[("z", "1"), ("m", "2"), ("a", "3")])).unwrap();
        let keys: Vec<&str> = state.latest_entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "m", "z"]);
    }

    #[test]
    fn test_restore_rejects_future_commit() {
        let entries = vec![("a".to_string(), CommitId::new(9), b"x".to_vec())];
        assert!(WorldState::restore(CommitId::new(3), entries).is_err());
    }

    #[test]
    fn test_restore_resumes_commit_sequence() {
        let entries = vec![("a".to_string(), CommitId::new(2), b"x".to_vec())];
        let mut state = WorldState::restore(CommitId::new(4), entries).unwrap();
        assert_eq!(state.key_count(), 1);
        let next = state.apply(writes(&[("b", "y")])).unwrap();
        assert_eq!(next, CommitId::new(5));
    }
}
