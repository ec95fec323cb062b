// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Loaded modules and the live module cache.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;

#[cfg(test)]
#[path = "./module_test.rs"]
mod module_test;

/// Handle to a loaded module.
///
/// Clones share one identity; use [`Module::ptr_eq`] to ask whether two
/// handles name the very same load rather than two loads of the same name.
#[derive(Clone)]
pub struct Module(Arc<ModuleData>);

struct ModuleData {
    name: String,
    origin: Option<String>,
}

impl Module {
    /// Create a module with no recorded origin.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(Arc::new(ModuleData {
            name: name.into(),
            origin: None,
        }))
    }

    /// Create a module remembering where the loader found it.
    pub fn with_origin<S: Into<String>, O: Into<String>>(name: S, origin: O) -> Self {
        Self(Arc::new(ModuleData {
            name: name.into(),
            origin: Some(origin.into()),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn origin(&self) -> Option<&str> {
        self.0.origin.as_deref()
    }

    /// True if both handles refer to the same loaded module.
    pub fn ptr_eq(&self, other: &Module) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.0.name)
            .field("origin", &self.0.origin)
            .finish()
    }
}

/// The live name -> module cache.
///
/// A registry owns exactly one of these for its whole life. Callers may
/// clone the handle and hold on to it; installing a snapshot rewrites the
/// contents in place so such handles never go stale.
#[derive(Clone, Default)]
pub struct ModuleCache(Arc<Mutex<IndexMap<String, Module>>>);

impl ModuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<String, Module>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, name: &str) -> Option<Module> {
        self.lock().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    /// Cache a module under its own name, returning any module it displaced.
    pub fn insert(&self, module: Module) -> Option<Module> {
        self.lock().insert(module.name().to_string(), module)
    }

    /// Cache `module` under `name` unless the name is already taken,
    /// returning whichever handle ends up cached.
    pub(crate) fn get_or_insert(&self, name: &str, module: Module) -> Module {
        self.lock()
            .entry(name.to_string())
            .or_insert(module)
            .clone()
    }

    pub fn remove(&self, name: &str) -> Option<Module> {
        self.lock().shift_remove(name)
    }

    /// Cached names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// True if both handles refer to the same cache container.
    pub fn ptr_eq(&self, other: &ModuleCache) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Independent copy of the current entries.
    pub(crate) fn entries(&self) -> IndexMap<String, Module> {
        self.lock().clone()
    }

    /// Swap the contents for `entries` without replacing the container.
    pub(crate) fn replace_contents(&self, entries: IndexMap<String, Module>) {
        let mut live = self.lock();
        live.clear();
        live.extend(entries);
    }
}

impl fmt::Debug for ModuleCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.lock().keys()).finish()
    }
}
