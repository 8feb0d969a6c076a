//! Immutable value versions and per-key version chains
//!
//! Every put that commits appends a new version; nothing is overwritten in
//! place. Versions no open read view can see are pruned. Visibility for a read view is "newest version whose commit id is
//! at or below the view's upper bound".

use super::commit::{CommitId, ReadView};

/// A single immutable value version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Version {
    value: Vec<u8>,
    commit_id: CommitId,
}

impl Version {
    /// Creates a version committed at `commit_id`.
    pub fn new(value: Vec<u8>, commit_id: CommitId) -> Self {
        Self { value, commit_id }
    }

    /// Returns the stored bytes.
    #[inline]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Returns the commit identity.
    #[inline]
    pub fn commit_id(&self) -> CommitId {
        self.commit_id
    }
}

/// Version history of one key, in ascending commit order.
#[derive(Clone, Debug, Default)]
pub struct VersionChain {
    versions: Vec<Version>,
}

impl VersionChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a version. Callers append in commit order.
    pub fn push(&mut self, version: Version) {
        debug_assert!(self
            .versions
            .last()
            .map_or(true, |last| last.commit_id() < version.commit_id()));
        self.versions.push(version);
    }

    /// Returns the number of versions.
    #[inline]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Returns true if no version was ever committed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Newest committed version, regardless of any read view.
    pub fn latest(&self) -> Option<&Version> {
        self.versions.last()
    }

    /// Drops every version superseded at or below `floor`, keeping the one
    /// a view at `floor` sees and everything newer. Returns how many were
    /// dropped.
    pub fn prune(&mut self, floor: CommitId) -> usize {
        let keep_from = self
            .versions
            .iter()
            .rposition(|v| v.commit_id() <= floor)
            .unwrap_or(0);
        self.versions.drain(..keep_from).count()
    }

    /// Newest version visible under `view`.
    pub fn visible_at(&self, view: ReadView) -> Option<&Version> {
        let upper_bound = view.upper_bound();
        self.versions
            .iter()
            .rev()
            .find(|v| v.commit_id() <= upper_bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(commits: &[u64]) -> VersionChain {
        let mut chain = VersionChain::new();
        for c in commits {
            chain.push(Version::new(format!("v{}", c).into_bytes(), CommitId::new(*c)));
        }
        chain
    }

    #[test]
    fn test_visibility_selects_largest_commit_within_bound() {
        let chain = chain(&[10, 20, 30]);
        let view = ReadView::new(CommitId::new(25));
        let version = chain.visible_at(view).unwrap();
        assert_eq!(version.commit_id(), CommitId::new(20));
        assert_eq!(version.value(), b"v20");
    }

    #[test]
    fn test_exact_bound_is_visible() {
        let chain = chain(&[10, 20]);
        let view = ReadView::new(CommitId::new(20));
        assert_eq!(chain.visible_at(view).unwrap().commit_id(), CommitId::new(20));
    }

    #[test]
    fn test_nothing_visible_before_first_commit() {
        let chain = chain(&[10]);
        assert!(chain.visible_at(ReadView::new(CommitId::new(9))).is_none());
    }

    #[test]
    fn test_prune_keeps_version_visible_at_floor() {
        let mut chain = chain(&[10, 20, 30, 40]);
        assert_eq!(chain.prune(CommitId::new(25)), 1);
        assert_eq!(chain.len(), 3);
        assert_eq!(
            chain.visible_at(ReadView::new(CommitId::new(25))).unwrap().commit_id(),
            CommitId::new(20)
        );
        assert_eq!(chain.latest().unwrap().commit_id(), CommitId::new(40));
    }

    #[test]
    fn test_prune_below_first_commit_is_noop() {
        let mut chain = chain(&[10, 20]);
        assert_eq!(chain.prune(CommitId::new(5)), 0);
        assert_eq!(chain.prune(CommitId::new(99)), 1);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_latest_ignores_view() {
        let chain = chain(&[1, 2, 3]);
        assert_eq!(chain.latest().unwrap().commit_id(), CommitId::new(3));
        assert_eq!(chain.len(), 3);
        assert!(VersionChain::new().is_empty());
    }
}
