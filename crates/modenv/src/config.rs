// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Constructor configuration for module environments.

use serde::{Deserialize, Serialize};

use crate::DEFAULT_SYS_ATTRS;

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

/// Which named lists an environment manages besides the module cache.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnvConfig {
    /// Names of the registry lists to capture and swap, in order.
    /// Repeated names are tracked once.
    #[serde(default = "default_sys_attrs")]
    pub sys_attrs: Vec<String>,
}

fn default_sys_attrs() -> Vec<String> {
    DEFAULT_SYS_ATTRS.iter().map(|s| s.to_string()).collect()
}

impl EnvConfig {
    pub fn new<I, S>(sys_attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sys_attrs: sys_attrs.into_iter().map(Into::into).collect(),
        }
    }

    /// Manage the module cache and nothing else.
    pub fn modules_only() -> Self {
        Self {
            sys_attrs: Vec::new(),
        }
    }

    /// Also manage the list called `name`.
    pub fn with_attr<S: Into<String>>(mut self, name: S) -> Self {
        self.sys_attrs.push(name.into());
        self
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            sys_attrs: default_sys_attrs(),
        }
    }
}
