// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Named ordered lists of search paths and hook entries.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[cfg(test)]
#[path = "./list_test.rs"]
mod list_test;

/// Shared handle to one ordered list of entries.
///
/// Unlike the module cache, the registry swaps these by reference: after a
/// snapshot is installed, a handle taken beforehand keeps pointing at the
/// old list while [`crate::Registry::list`] hands out the new one.
#[derive(Clone, Default)]
pub struct SearchList(Arc<Mutex<Vec<String>>>);

impl SearchList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(Arc::new(Mutex::new(
            entries.into_iter().map(Into::into).collect(),
        )))
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current entries, in order.
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn push<S: Into<String>>(&self, entry: S) {
        self.lock().push(entry.into());
    }

    /// Insert at `index`, clamped to the end of the list.
    pub fn insert<S: Into<String>>(&self, index: usize, entry: S) {
        let mut entries = self.lock();
        let index = index.min(entries.len());
        entries.insert(index, entry.into());
    }

    /// Remove the first matching entry, returning whether one was found.
    pub fn remove(&self, entry: &str) -> bool {
        let mut entries = self.lock();
        match entries.iter().position(|e| e == entry) {
            Some(pos) => {
                entries.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.lock().iter().any(|e| e == entry)
    }

    pub fn last(&self) -> Option<String> {
        self.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// A separate list holding the same entries.
    pub(crate) fn detached(&self) -> Self {
        Self(Arc::new(Mutex::new(self.entries())))
    }

    /// True if both handles refer to the same list object.
    pub fn ptr_eq(&self, other: &SearchList) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SearchList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.lock().iter()).finish()
    }
}
