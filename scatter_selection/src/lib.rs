// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=scatter_selection --heading-base-level=0

//! Scatter Selection: the selected-points value of a scatterplot.
//!
//! A scatterplot selection is a *value*, not an accumulator: every committing
//! gesture (a click on a point, the end of a lasso, a programmatic select)
//! replaces the whole selection, and a deselect clears it. There is no
//! toggle or incremental extend.
//!
//! The core type is [`Selection`], which tracks:
//! - The ordered sequence of selected keys (point indices in practice).
//! - A monotonically increasing **revision** counter that bumps only when the
//!   contents actually change.
//!
//! ## Minimal example
//!
//! ```rust
//! use scatter_selection::Selection;
//!
//! let mut selection = Selection::<u32>::new();
//!
//! // Click on point 10.
//! selection.select_only(10);
//! assert_eq!(selection.items(), &[10]);
//!
//! // Clicking another point replaces, it does not append.
//! selection.select_only(11);
//! assert_eq!(selection.items(), &[11]);
//!
//! // A lasso commits a batch computed elsewhere.
//! selection.replace_with_unique([1, 2, 3]);
//! assert_eq!(selection.len(), 3);
//!
//! // Deselect reports whether anything was cleared.
//! assert!(selection.clear());
//! assert!(!selection.clear());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// An ordered selection of keys with a change revision.
///
/// `Selection` only requires equality from `T` for de-duplicating
/// replacements. The order of [`Selection::items`] is the order the keys were
/// committed in.
#[derive(Clone, Debug, Default)]
pub struct Selection<T> {
    items: Vec<T>,
    revision: u64,
}

impl<T> Selection<T> {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            revision: 0,
        }
    }

    /// Returns `true` if the selection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the selected keys in commit order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns an iterator over the selected keys.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the current revision counter.
    ///
    /// The revision is bumped only when a mutation changes the contents.
    /// No-op calls (for example, clearing an empty selection) leave it
    /// unchanged.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Removes all keys from the selection.
    ///
    /// Returns `true` if the selection was non-empty.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        self.bump_revision();
        true
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<T> Selection<T>
where
    T: PartialEq,
{
    /// Returns `true` if the selection currently contains `key`.
    #[must_use]
    pub fn contains(&self, key: &T) -> bool {
        self.items.iter().any(|k| k == key)
    }

    /// Replaces the selection with a single key.
    ///
    /// This is the mapping for a click on a point.
    pub fn select_only(&mut self, key: T) {
        if self.items.len() == 1 && self.items.first() == Some(&key) {
            return;
        }
        self.items.clear();
        self.items.push(key);
        self.bump_revision();
    }

    /// Replaces the selection with the provided batch of keys.
    ///
    /// Duplicates in the input are dropped, keeping the first occurrence.
    /// De-duplication scans the accumulated output, so this is quadratic in
    /// the number of keys. Prefer [`Selection::replace_with_unique`] when the
    /// input is known to be unique, such as the result of a spatial query.
    pub fn replace_with<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut new_items: Vec<T> = Vec::new();
        for key in keys {
            if !new_items.iter().any(|existing| existing == &key) {
                new_items.push(key);
            }
        }
        self.replace_with_items(new_items);
    }

    /// Replaces the selection with the provided batch of *unique* keys.
    ///
    /// This does **not** de-duplicate or check for duplicates. Spatial
    /// queries report each point at most once, so their results can be
    /// committed directly in linear time.
    pub fn replace_with_unique<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.replace_with_items(keys.into_iter().collect());
    }

    fn replace_with_items(&mut self, new_items: Vec<T>) {
        if new_items == self.items {
            return;
        }
        self.items = new_items;
        self.bump_revision();
    }
}

#[cfg(feature = "hashbrown")]
impl<T> Selection<T>
where
    T: core::hash::Hash + Eq + Clone,
{
    /// Replaces the selection with the provided batch of keys, de-duplicating
    /// with hashing.
    ///
    /// Linear alternative to [`Selection::replace_with`] for large inputs
    /// from untrusted sources, preserving first-occurrence order.
    pub fn replace_with_hashed<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = T>,
    {
        use hashbrown::HashSet;

        let iter = keys.into_iter();
        let (lower, upper) = iter.size_hint();
        let cap = upper.unwrap_or(lower);

        let mut seen: HashSet<T> = HashSet::with_capacity(cap);
        let mut new_items: Vec<T> = Vec::with_capacity(cap);
        for key in iter {
            if seen.insert(key.clone()) {
                new_items.push(key);
            }
        }
        self.replace_with_items(new_items);
    }
}
