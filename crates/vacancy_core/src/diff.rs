//! Keyed list diffing.
//!
//! [`diff`] compares two snapshots and produces a [`ChangeSet`]: an ordered list of
//! operations that turns the old snapshot into the new one. Each operation's index
//! refers to the list as it stands after the previous operation has been applied,
//! so a sink can replay the set one step at a time.
//!
//! Operations are emitted in four phases: removals (highest index first), moves,
//! insertions (lowest index first), then content changes at their final positions.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Stable identity of a list item, used to match items across snapshots.
pub trait Keyed {
    type Key: Eq + Hash + ?Sized;

    fn key(&self) -> &Self::Key;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change<T> {
    Removed { index: usize },
    /// Remove the item at `from`, then insert it at `to`.
    Moved { from: usize, to: usize },
    Inserted { index: usize, item: T },
    /// Same identity, different content.
    Changed { index: usize, item: T },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeCounts {
    pub removed: usize,
    pub moved: usize,
    pub inserted: usize,
    pub changed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet<T> {
    changes: Vec<Change<T>>,
}

impl<T> Default for ChangeSet<T> {
    fn default() -> Self {
        Self {
            changes: Vec::new(),
        }
    }
}

impl<T> ChangeSet<T> {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn changes(&self) -> &[Change<T>] {
        &self.changes
    }

    pub fn counts(&self) -> ChangeCounts {
        let mut counts = ChangeCounts::default();
        for change in &self.changes {
            match change {
                Change::Removed { .. } => counts.removed += 1,
                Change::Moved { .. } => counts.moved += 1,
                Change::Inserted { .. } => counts.inserted += 1,
                Change::Changed { .. } => counts.changed += 1,
            }
        }
        counts
    }
}

impl<T: Clone> ChangeSet<T> {
    /// Replays the operations against `target`.
    ///
    /// `target` must hold the snapshot this set was computed from; otherwise the
    /// indices are meaningless and this panics on out-of-range access.
    pub fn apply_to(&self, target: &mut Vec<T>) {
        for change in &self.changes {
            match change {
                Change::Removed { index } => {
                    target.remove(*index);
                }
                Change::Moved { from, to } => {
                    let item = target.remove(*from);
                    target.insert(*to, item);
                }
                Change::Inserted { index, item } => target.insert(*index, item.clone()),
                Change::Changed { index, item } => target[*index] = item.clone(),
            }
        }
    }
}

/// Computes the operations that turn `old` into `new`.
///
/// Items are matched by key; the k-th occurrence of a key in `old` pairs with the
/// k-th occurrence in `new`. Matched items that keep their relative order (the
/// longest increasing run) stay put, the rest are moved.
pub fn diff<T>(old: &[T], new: &[T]) -> ChangeSet<T>
where
    T: Keyed + PartialEq + Clone,
{
    let mut by_key: HashMap<&T::Key, VecDeque<usize>> = HashMap::with_capacity(old.len());
    for (index, item) in old.iter().enumerate() {
        by_key.entry(item.key()).or_default().push_back(index);
    }

    let mut old_to_new: Vec<Option<usize>> = vec![None; old.len()];
    let mut new_to_old: Vec<Option<usize>> = Vec::with_capacity(new.len());
    for (new_index, item) in new.iter().enumerate() {
        let matched = by_key.get_mut(item.key()).and_then(VecDeque::pop_front);
        if let Some(old_index) = matched {
            old_to_new[old_index] = Some(new_index);
        }
        new_to_old.push(matched);
    }

    let mut changes = Vec::new();

    for (old_index, target) in old_to_new.iter().enumerate().rev() {
        if target.is_none() {
            changes.push(Change::Removed { index: old_index });
        }
    }

    // Survivors in their current order, identified by their new index.
    let mut working: Vec<usize> = old_to_new.iter().flatten().copied().collect();
    let mut stable = vec![false; new.len()];
    for new_index in longest_increasing(&working) {
        stable[new_index] = true;
    }

    let targets: Vec<usize> = (0..new.len())
        .filter(|&new_index| new_to_old[new_index].is_some())
        .collect();
    for (position, &target) in targets.iter().enumerate() {
        if stable[target] {
            continue;
        }
        let Some(from) = index_of(&working, target) else {
            continue;
        };
        working.remove(from);
        // Place right after the item that precedes it in the new order.
        let to = match position.checked_sub(1) {
            Some(prev) => index_of(&working, targets[prev]).map_or(0, |at| at + 1),
            None => 0,
        };
        working.insert(to, target);
        if from != to {
            changes.push(Change::Moved { from, to });
        }
    }

    for (new_index, item) in new.iter().enumerate() {
        if new_to_old[new_index].is_none() {
            changes.push(Change::Inserted {
                index: new_index,
                item: item.clone(),
            });
        }
    }

    for (new_index, item) in new.iter().enumerate() {
        if let Some(old_index) = new_to_old[new_index] {
            if old[old_index] != *item {
                changes.push(Change::Changed {
                    index: new_index,
                    item: item.clone(),
                });
            }
        }
    }

    ChangeSet { changes }
}

fn index_of(values: &[usize], wanted: usize) -> Option<usize> {
    values.iter().position(|&value| value == wanted)
}

/// Values of one longest strictly increasing subsequence of `seq`.
fn longest_increasing(seq: &[usize]) -> Vec<usize> {
    let mut tails: Vec<usize> = Vec::new();
    let mut prev: Vec<Option<usize>> = vec![None; seq.len()];

    for (index, &value) in seq.iter().enumerate() {
        let pos = tails.partition_point(|&tail| seq[tail] < value);
        if pos > 0 {
            prev[index] = Some(tails[pos - 1]);
        }
        if pos == tails.len() {
            tails.push(index);
        } else {
            tails[pos] = index;
        }
    }

    let mut result = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(index) = cursor {
        result.push(seq[index]);
        cursor = prev[index];
    }
    result.reverse();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_increasing_picks_a_maximal_run() {
        assert_eq!(longest_increasing(&[3, 0, 1, 2]), vec![0, 1, 2]);
        assert_eq!(longest_increasing(&[]), Vec::<usize>::new());
        assert_eq!(longest_increasing(&[2, 1, 0]).len(), 1);
        assert_eq!(longest_increasing(&[0, 4, 1, 2, 3]), vec![0, 1, 2, 3]);
    }
}
