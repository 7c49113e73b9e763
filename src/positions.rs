//! Position index: where each priority currently lives in the storage
//!
//! Priorities need not be unique, so every key maps to a group of storage
//! indices rather than a single slot. Groups are kept in the order their
//! indices were recorded; empty groups are dropped so that "the key has a
//! group" and "some element has this priority" are the same question.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::hash::Hash;

/// Storage indices holding elements that share a priority
///
/// Most keys are held by a single element, so the first slot is inline.
pub(crate) type PositionGroup = SmallVec<[usize; 1]>;

#[derive(Debug, Clone)]
pub(crate) struct PositionIndex<P> {
    groups: FxHashMap<P, PositionGroup>,
}

impl<P: Eq + Hash + Clone> PositionIndex<P> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        PositionIndex {
            groups: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Records that an element keyed by `priority` now sits at `index`,
    /// dropping the stale `old_index` entry from the same group if given.
    pub(crate) fn record(&mut self, priority: &P, index: usize, old_index: Option<usize>) {
        match self.groups.get_mut(priority) {
            Some(group) => {
                if let Some(old) = old_index {
                    if let Some(at) = group.iter().position(|&i| i == old) {
                        group.remove(at);
                    }
                }
                group.push(index);
            }
            None => {
                let mut group = PositionGroup::new();
                group.push(index);
                self.groups.insert(priority.clone(), group);
            }
        }
    }

    /// Removes `index` from the group for `priority`.
    ///
    /// Returns false if the index was not recorded there.
    pub(crate) fn detach(&mut self, priority: &P, index: usize) -> bool {
        let Some(group) = self.groups.get_mut(priority) else {
            return false;
        };
        let Some(at) = group.iter().position(|&i| i == index) else {
            return false;
        };
        group.remove(at);
        if group.is_empty() {
            self.groups.remove(priority);
        }
        true
    }

    /// Removes and returns the whole group for `priority`.
    pub(crate) fn take(&mut self, priority: &P) -> Option<PositionGroup> {
        self.groups.remove(priority)
    }

    pub(crate) fn group(&self, priority: &P) -> Option<&[usize]> {
        self.groups
            .get(priority)
            .map(|group| group.as_slice())
            .filter(|group| !group.is_empty())
    }

    pub(crate) fn contains(&self, priority: &P) -> bool {
        self.group(priority).is_some()
    }

    /// Total number of recorded indices across all groups
    pub(crate) fn recorded(&self) -> usize {
        self.groups.values().map(|group| group.len()).sum()
    }

    pub(crate) fn clear(&mut self) {
        self.groups.clear();
    }
}
