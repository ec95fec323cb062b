// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Module environments and their inverses.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::cell::SharedCell;
use crate::error::{Result, UsageError};
use crate::{EnvConfig, Module, Registry, Snapshot};

#[cfg(test)]
#[path = "./environment_test.rs"]
mod environment_test;

/// Direction of an environment relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvKind {
    /// Installs its own state on entry.
    Primary,
    /// Restores the state its parent replaced.
    Inverse,
}

impl EnvKind {
    pub fn inverse(self) -> Self {
        match self {
            Self::Primary => Self::Inverse,
            Self::Inverse => Self::Primary,
        }
    }
}

/// A scoped, reversible layer of module-resolution state.
///
/// Cloning the handle does not create a new environment; identity is only
/// minted by construction and by [`ModuleEnv::inverse`].
#[derive(Clone)]
pub struct ModuleEnv {
    node: Arc<EnvNode>,
}

struct EnvNode {
    kind: EnvKind,
    parent: Option<ModuleEnv>,
    cell: SharedCell,
    registry: Arc<Registry>,
}

impl ModuleEnv {
    /// A root environment over the global registry managing the default lists.
    pub fn new() -> Self {
        Self::with_config(&EnvConfig::default())
    }

    /// A root environment over the global registry.
    pub fn with_config(config: &EnvConfig) -> Self {
        Self::in_registry(Registry::global(), config)
    }

    /// A root environment over `registry`, seeded with its current state.
    pub fn in_registry(registry: Arc<Registry>, config: &EnvConfig) -> Self {
        let snapshot = Snapshot::capture(&registry, config.sys_attrs.iter().cloned());
        Self {
            node: Arc::new(EnvNode {
                kind: EnvKind::Primary,
                parent: None,
                cell: SharedCell::new(snapshot),
                registry,
            }),
        }
    }

    /// Construct a root environment of the given kind.
    ///
    /// Only [`EnvKind::Primary`] can be a root; inverses come from
    /// [`ModuleEnv::inverse`].
    pub fn construct(registry: Arc<Registry>, kind: EnvKind, config: &EnvConfig) -> Result<Self> {
        match kind {
            EnvKind::Primary => Ok(Self::in_registry(registry, config)),
            EnvKind::Inverse => Err(UsageError::DirectInverse.into()),
        }
    }

    pub fn kind(&self) -> EnvKind {
        self.node.kind
    }

    /// The environment this one was derived from; `None` for a root.
    pub fn parent(&self) -> Option<&ModuleEnv> {
        self.node.parent.as_ref()
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.node.registry
    }

    /// Names of the lists swapped alongside the module cache.
    pub fn managed_lists(&self) -> Vec<String> {
        self.node.cell.names()
    }

    /// A new environment of the opposite kind whose parent is `self`.
    ///
    /// Entering it while `self` is active swaps back to the state `self`
    /// replaced. Each call returns a distinct environment.
    pub fn inverse(&self) -> ModuleEnv {
        ModuleEnv {
            node: Arc::new(EnvNode {
                kind: self.kind().inverse(),
                parent: Some(self.clone()),
                cell: self.node.cell.clone(),
                registry: Arc::clone(&self.node.registry),
            }),
        }
    }

    /// Install this environment's state and make it the active one.
    ///
    /// The returned guard restores the previous state when dropped. Nothing
    /// is changed if entry is refused.
    ///
    /// Entry is checked against the stack of the registry this environment
    /// was built on. Environments of different registries never block each
    /// other; every environment built with [`ModuleEnv::new`] shares the
    /// global registry and so the global stack.
    pub fn enter(&self) -> Result<EnvGuard> {
        let registry = self.registry();
        let mut stack = registry.active();
        if let Err(err) = stack.check_enter(self) {
            tracing::debug!(
                kind = ?self.kind(),
                depth = stack.depth(),
                error = %err,
                "refused module environment"
            );
            return Err(err.into());
        }
        self.node.cell.swap(registry);
        stack.push(self.clone());
        tracing::debug!(kind = ?self.kind(), depth = stack.depth(), "entered module environment");
        Ok(EnvGuard { env: self.clone() })
    }

    /// Run `f` with this environment entered.
    ///
    /// The environment is exited however `f` finishes, including by panic.
    pub fn with<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&ModuleEnv) -> R,
    {
        let guard = self.enter()?;
        let out = f(self);
        guard.exit();
        Ok(out)
    }

    fn release(&self) {
        let registry = self.registry();
        let mut stack = registry.active();
        if !stack.is_top(Some(self)) {
            tracing::error!(
                kind = ?self.kind(),
                depth = stack.depth(),
                "exiting a module environment that is not active"
            );
            drop(stack);
            if !std::thread::panicking() {
                panic!("sanity check: module environment exited while not active");
            }
            return;
        }
        self.node.cell.swap(registry);
        stack.pop();
        tracing::debug!(kind = ?self.kind(), depth = stack.depth(), "exited module environment");
    }

    /// Get a module as seen from this environment.
    ///
    /// Only allowed while this environment is the active one. A cached
    /// module is returned as is; otherwise it is imported through the
    /// registry's loader, which also caches it.
    pub fn lookup(&self, name: &str) -> Result<Module> {
        if !self.is_active() {
            return Err(UsageError::NotActive {
                module: name.to_string(),
            }
            .into());
        }
        Ok(self.registry().import(name)?)
    }

    /// True if this environment is the innermost entered one.
    pub fn is_active(&self) -> bool {
        self.registry().active().is_top(Some(self))
    }

    /// True if both handles are the same environment.
    pub fn ptr_eq(&self, other: &ModuleEnv) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    fn lineage_depth(&self) -> usize {
        std::iter::successors(self.parent(), |env| env.parent()).count()
    }
}

impl Default for ModuleEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ModuleEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleEnv")
            .field("kind", &self.kind())
            .field("lineage_depth", &self.lineage_depth())
            .finish()
    }
}

/// Keeps a [`ModuleEnv`] entered until dropped.
///
/// Guards must be released innermost first.
#[must_use = "the environment is exited as soon as the guard is dropped"]
pub struct EnvGuard {
    env: ModuleEnv,
}

impl EnvGuard {
    /// Exit the environment now.
    pub fn exit(self) {
        drop(self);
    }
}

impl Deref for EnvGuard {
    type Target = ModuleEnv;

    fn deref(&self) -> &ModuleEnv {
        &self.env
    }
}

impl fmt::Debug for EnvGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EnvGuard").field(&self.env).finish()
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        self.env.release();
    }
}
