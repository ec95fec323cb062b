// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! The live module-resolution state that environments swap in and out.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use once_cell::sync::Lazy;

use crate::error::ImportError;
use crate::loader::{Loader, NullLoader};
use crate::stack::ActiveStack;
use crate::{DEFAULT_SYS_ATTRS, Module, ModuleCache, SearchList};

#[cfg(test)]
#[path = "./registry_test.rs"]
mod registry_test;

/// Process-wide registry consulted by legacy callers.
static GLOBAL_REGISTRY: Lazy<Arc<Registry>> = Lazy::new(|| Arc::new(Registry::new()));

/// One complete module-resolution state: a module cache, a set of named
/// lists, the loader used on cache misses and the stack of environments
/// currently installed over it.
///
/// Registries are not meant to be shared between threads of control while
/// environments are being entered or exited; the locks inside only keep
/// the types sound, they do not make interleaved use meaningful.
pub struct Registry {
    modules: ModuleCache,
    lists: Mutex<HashMap<String, SearchList>>,
    loader: RwLock<Arc<dyn Loader>>,
    active: Mutex<ActiveStack>,
}

impl Registry {
    /// Create a registry with the well-known lists present but empty and a
    /// [`NullLoader`].
    pub fn new() -> Self {
        Self::with_loader(NullLoader)
    }

    pub fn with_loader<L: Loader + 'static>(loader: L) -> Self {
        let lists = DEFAULT_SYS_ATTRS
            .iter()
            .map(|name| (name.to_string(), SearchList::default()))
            .collect();
        Self {
            modules: ModuleCache::new(),
            lists: Mutex::new(lists),
            loader: RwLock::new(Arc::new(loader)),
            active: Mutex::new(ActiveStack::new()),
        }
    }

    /// The process-wide registry.
    pub fn global() -> Arc<Registry> {
        Arc::clone(&GLOBAL_REGISTRY)
    }

    /// Replace the loader used for cache misses.
    pub fn set_loader<L: Loader + 'static>(&self, loader: L) {
        let mut current = self.loader.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(loader);
    }

    /// The live module cache. Its identity never changes.
    pub fn modules(&self) -> &ModuleCache {
        &self.modules
    }

    fn lists(&self) -> MutexGuard<'_, HashMap<String, SearchList>> {
        self.lists.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The live list called `name`, created empty if it does not exist yet.
    pub fn list(&self, name: &str) -> SearchList {
        self.lists()
            .entry(name.to_string())
            .or_default()
            .clone()
    }

    /// Make `list` the live list called `name`, returning the one it replaced.
    pub fn replace_list(&self, name: &str, list: SearchList) -> Option<SearchList> {
        self.lists().insert(name.to_string(), list)
    }

    /// Names of all live lists, sorted.
    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lists().keys().cloned().collect();
        names.sort();
        names
    }

    /// Import `name` the ordinary way.
    ///
    /// A cached module is returned as is. Otherwise the loader is asked for
    /// it and the result is cached before being returned.
    pub fn import(&self, name: &str) -> Result<Module, ImportError> {
        if let Some(module) = self.modules.get(name) {
            tracing::trace!(module = name, "module cache hit");
            return Ok(module);
        }

        let loader = Arc::clone(&*self.loader.read().unwrap_or_else(PoisonError::into_inner));
        tracing::trace!(module = name, "loading uncached module");
        let module = loader.load(name, self)?;
        Ok(self.modules.get_or_insert(name, module))
    }

    /// Number of environments currently entered on this registry.
    pub fn active_depth(&self) -> usize {
        self.active().depth()
    }

    pub(crate) fn active(&self) -> MutexGuard<'_, ActiveStack> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("modules", &self.modules)
            .field("lists", &self.list_names())
            .field("active_depth", &self.active_depth())
            .finish()
    }
}
