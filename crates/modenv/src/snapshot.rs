// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Capture and re-install of a registry's module-resolution state.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::{Module, Registry, SearchList};

#[cfg(test)]
#[path = "./snapshot_test.rs"]
mod snapshot_test;

/// One full copy of the tracked state of a registry at a single instant.
///
/// The module cache is always tracked; `names` lists which named lists are
/// tracked alongside it.
#[derive(Debug, Default)]
pub struct Snapshot {
    names: Arc<[String]>,
    lists: IndexMap<String, SearchList>,
    modules: IndexMap<String, Module>,
}

impl Snapshot {
    /// Copy the live module cache and each named list out of `registry`.
    ///
    /// Duplicate names are tracked once. The copies are independent of the
    /// live containers.
    pub fn capture<I, S>(registry: &Registry, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: IndexSet<String> = names.into_iter().map(Into::into).collect();
        Self::capture_names(registry, names.into_iter().collect())
    }

    fn capture_names(registry: &Registry, names: Arc<[String]>) -> Self {
        let lists = names
            .iter()
            .map(|name| (name.clone(), registry.list(name).detached()))
            .collect();
        Self {
            names,
            lists,
            modules: registry.modules().entries(),
        }
    }

    /// Make this snapshot the live state of `registry`.
    ///
    /// Returns a snapshot of what was live immediately before, tracking the
    /// same names, so installing the result undoes this call. Named lists
    /// are handed over by reference; the module cache keeps its identity
    /// and only has its contents replaced.
    ///
    /// Only environments call this, so every swap goes through the active
    /// stack's entry checks.
    pub(crate) fn install(self, registry: &Registry) -> Snapshot {
        let previous = Self::capture_names(registry, Arc::clone(&self.names));
        tracing::trace!(
            lists = self.lists.len(),
            modules = self.modules.len(),
            "installing snapshot"
        );
        for (name, list) in self.lists {
            registry.replace_list(&name, list);
        }
        registry.modules().replace_contents(self.modules);
        previous
    }

    /// Names of the tracked lists, in configuration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn contains_module(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn module_names(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    /// Entries of a tracked list, or `None` if `name` is not tracked.
    pub fn list_entries(&self, name: &str) -> Option<Vec<String>> {
        self.lists.get(name).map(SearchList::entries)
    }
}
