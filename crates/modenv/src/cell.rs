// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! The snapshot slot shared by an environment lineage.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{Registry, Snapshot};

/// Holds the snapshot that swapping right now would install.
///
/// A root environment creates one; every environment derived from it via
/// `inverse()` holds a clone of the same handle.
#[derive(Debug, Clone)]
pub(crate) struct SharedCell(Arc<Mutex<Snapshot>>);

impl SharedCell {
    pub fn new(snapshot: Snapshot) -> Self {
        Self(Arc::new(Mutex::new(snapshot)))
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Install the held snapshot and keep what it replaced.
    pub fn swap(&self, registry: &Registry) {
        let mut slot = self.lock();
        let current = std::mem::take(&mut *slot);
        *slot = current.install(registry);
    }

    /// Names of the lists tracked by this lineage.
    pub fn names(&self) -> Vec<String> {
        self.lock().names().to_vec()
    }

    #[cfg(test)]
    pub fn ptr_eq(&self, other: &SharedCell) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
