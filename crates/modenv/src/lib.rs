// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! modenv - Reversible Module Resolution Environments
//!
//! This crate temporarily replaces a registry's module-resolution state (its
//! module cache plus a configurable set of named search and hook lists) and
//! guarantees the previous state comes back when the environment is exited.
//!
//! # Overview
//!
//! A [`ModuleEnv`] is constructed standalone and captures the registry state
//! at that moment. Entering it swaps that state in; exiting swaps the prior
//! state back. [`ModuleEnv::inverse`] produces the paired opposite
//! environment: entering it while its parent is active escapes back to the
//! state that existed before the parent was entered, and the inverse of an
//! inverse moves forward again. Every environment derived this way shares
//! one snapshot slot, so the whole lineage follows a single timeline.
//!
//! Entry is policed by a per-registry stack:
//!
//! - an inverse may only be entered directly on top of its parent,
//! - a primary environment may never be entered directly on top of another
//!   primary environment,
//! - a derived environment may only be entered directly on top of its parent.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use modenv::{EnvConfig, Module, ModuleEnv, Registry};
//!
//! let registry = Arc::new(Registry::new());
//! let env = ModuleEnv::in_registry(Arc::clone(&registry), &EnvConfig::default());
//!
//! env.with(|env| {
//!     env.registry().modules().insert(Module::new("scratch"));
//!     assert!(env.lookup("scratch").is_ok());
//! })
//! .unwrap();
//!
//! assert!(!registry.modules().contains("scratch"));
//! ```
//!
//! All state is shared and mutated in place; entering and exiting
//! environments of one registry from several threads at once is not
//! supported.

mod cell;
pub mod config;
pub mod environment;
pub mod error;
pub mod list;
pub mod loader;
pub mod module;
pub mod registry;
pub mod snapshot;
mod stack;

pub use config::EnvConfig;
pub use environment::{EnvGuard, EnvKind, ModuleEnv};
pub use error::{Error, ImportError, Result, UsageError};
pub use list::SearchList;
pub use loader::{Loader, NullLoader};
pub use module::{Module, ModuleCache};
pub use registry::Registry;
pub use snapshot::Snapshot;

/// Well-known list of meta resolver hooks.
pub const META_PATH: &str = "meta_path";

/// Well-known list of path hooks.
pub const PATH_HOOKS: &str = "path_hooks";

/// Well-known module search path.
pub const PATH: &str = "path";

/// Well-known cache of per-path resolvers.
pub const PATH_IMPORTER_CACHE: &str = "path_importer_cache";

/// Lists managed by an environment unless configured otherwise.
pub const DEFAULT_SYS_ATTRS: [&str; 4] = [META_PATH, PATH_HOOKS, PATH, PATH_IMPORTER_CACHE];
