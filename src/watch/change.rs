//! # Change records and batches.
//!
//! One watcher delivery is a [`ChangeBatch`]: an ordered sequence of
//! [`ChangeEvent`] records, each classified by a [`ChangeKind`]. The
//! supervisor restarts only on batches that contain at least one record
//! classified as a modification ([`ChangeBatch::has_modifications`]).

use std::path::PathBuf;

/// Classification of a single filesystem change record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// The watcher could not classify the change.
    Any,
    /// The path was accessed.
    Access,
    /// The path was created.
    Create,
    /// The path's content or metadata changed.
    Modify,
    /// The path was removed.
    Remove,
}

impl ChangeKind {
    /// Returns `true` for the one classification that triggers a reload.
    #[inline]
    pub fn is_modify(&self) -> bool {
        matches!(self, ChangeKind::Modify)
    }
}

/// One classified path change, as reported by the external watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Path the change was observed on.
    pub path: PathBuf,
    /// Classification of the change.
    pub kind: ChangeKind,
}

impl ChangeEvent {
    /// Creates a change record.
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// One delivery from the watcher feed: zero or more ordered records.
///
/// ## Example
/// ```
/// use procvisor::{ChangeBatch, ChangeEvent, ChangeKind};
///
/// let batch = ChangeBatch::from(vec![
///     ChangeEvent::new("src/main.rs", ChangeKind::Access),
///     ChangeEvent::new("src/lib.rs", ChangeKind::Modify),
/// ]);
/// assert!(batch.has_modifications());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeBatch(Vec<ChangeEvent>);

impl ChangeBatch {
    /// Returns `true` when any record in the batch is classified
    /// [`ChangeKind::Modify`]. Batches without one never trigger a reload.
    pub fn has_modifications(&self) -> bool {
        self.0.iter().any(|event| event.kind.is_modify())
    }

    /// Number of records in the batch.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for an empty delivery.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the records in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = &ChangeEvent> {
        self.0.iter()
    }
}

impl From<Vec<ChangeEvent>> for ChangeBatch {
    fn from(events: Vec<ChangeEvent>) -> Self {
        Self(events)
    }
}

impl FromIterator<ChangeEvent> for ChangeBatch {
    fn from_iter<I: IntoIterator<Item = ChangeEvent>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_has_no_modifications() {
        assert!(!ChangeBatch::default().has_modifications());
    }

    #[test]
    fn non_modify_kinds_do_not_qualify() {
        let batch = ChangeBatch::from(vec![
            ChangeEvent::new("a", ChangeKind::Access),
            ChangeEvent::new("b", ChangeKind::Create),
            ChangeEvent::new("c", ChangeKind::Remove),
            ChangeEvent::new("d", ChangeKind::Any),
        ]);
        assert!(!batch.has_modifications());
    }

    #[test]
    fn single_modify_record_qualifies() {
        let batch = ChangeBatch::from(vec![
            ChangeEvent::new("a", ChangeKind::Access),
            ChangeEvent::new("b", ChangeKind::Modify),
        ]);
        assert!(batch.has_modifications());
        assert_eq!(batch.len(), 2);
    }
}
