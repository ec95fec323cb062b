// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! The host import mechanism, plugged in at the registry boundary.

use crate::error::ImportError;
use crate::{Module, Registry};

/// Resolves a module name that is not yet cached.
///
/// The registry calls this only on a cache miss and caches whatever it
/// returns. Implementations may consult the registry's live lists (for
/// example [`crate::PATH`]) to decide where to look.
pub trait Loader: Send + Sync {
    fn load(&self, name: &str, registry: &Registry) -> Result<Module, ImportError>;
}

impl<F> Loader for F
where
    F: Fn(&str, &Registry) -> Result<Module, ImportError> + Send + Sync,
{
    fn load(&self, name: &str, registry: &Registry) -> Result<Module, ImportError> {
        self(name, registry)
    }
}

/// Loader that never finds anything.
///
/// This is what [`Registry::new`] starts with, so only modules placed in
/// the cache explicitly can be looked up until a real loader is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLoader;

impl Loader for NullLoader {
    fn load(&self, name: &str, _registry: &Registry) -> Result<Module, ImportError> {
        Err(ImportError::NotFound(name.to_string()))
    }
}
