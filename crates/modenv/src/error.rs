// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for modenv operations.

use miette::Diagnostic;
use thiserror::Error;

/// Convenience Result type with modenv Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while entering or using a module environment.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// The environment was used out of order
    #[error(transparent)]
    #[diagnostic(transparent)]
    Usage(#[from] UsageError),

    /// The host import mechanism failed; passed through untouched
    #[error(transparent)]
    #[diagnostic(transparent)]
    Import(#[from] ImportError),
}

/// Improper use of a module environment.
///
/// Every one of these is detected before any global state is touched, so
/// the live registry and the active stack are unchanged when one is returned.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// Inverse environments only come from `inverse()`
    #[error("an Inverse environment cannot be constructed directly")]
    #[diagnostic(
        code(modenv::direct_inverse),
        help("Call `inverse()` on the environment you want to escape from")
    )]
    DirectInverse,

    /// Inverse entered while something other than its parent is active
    #[error("an Inverse environment must be entered while its parent is active")]
    #[diagnostic(
        code(modenv::inverse_outside_parent),
        help("Enter the environment that produced this inverse first")
    )]
    InverseOutsideParent,

    /// Primary entered directly on top of another Primary
    #[error("a Primary environment cannot be entered while another Primary environment is active")]
    #[diagnostic(
        code(modenv::nested_primary),
        help("Escape the active environment with its `inverse()` before entering another one")
    )]
    NestedPrimary,

    /// A derived environment entered outside its parent
    #[error("a child environment must be entered within its parent's active context")]
    #[diagnostic(code(modenv::child_outside_parent))]
    ChildOutsideParent,

    /// Lookup through an environment that is not the stack top
    #[error("cannot access a module through an environment that is not currently active")]
    #[diagnostic(
        code(modenv::not_active),
        help("Enter the environment before looking up {module:?}")
    )]
    NotActive { module: String },
}

/// Failures reported by the host import mechanism.
#[derive(Error, Diagnostic, Debug)]
pub enum ImportError {
    /// No loader could resolve the name
    #[error("No module named {0:?}")]
    #[diagnostic(code(modenv::module_not_found))]
    NotFound(String),

    /// The loader found the module but could not produce it
    #[error("Failed to load module {name:?}")]
    #[diagnostic(code(modenv::load_failed))]
    LoadFailed {
        name: String,
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,
    },
}
