// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! The stack of environments entered on a registry.

use crate::environment::{EnvKind, ModuleEnv};
use crate::error::UsageError;

#[cfg(test)]
#[path = "./stack_test.rs"]
mod stack_test;

#[derive(Debug)]
enum Frame {
    /// Bottom of every stack: nothing entered.
    Ambient,
    Entered(ModuleEnv),
}

/// Currently entered environments, innermost last.
///
/// Never empty; the bottom frame stands for the ambient state.
#[derive(Debug)]
pub(crate) struct ActiveStack {
    frames: Vec<Frame>,
}

impl ActiveStack {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::Ambient],
        }
    }

    /// The innermost entered environment, if any.
    pub fn top(&self) -> Option<&ModuleEnv> {
        match self.frames.last() {
            Some(Frame::Entered(env)) => Some(env),
            _ => None,
        }
    }

    /// Number of entered environments above the ambient frame.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// True if `env` is the top frame, `None` meaning the ambient frame.
    pub fn is_top(&self, env: Option<&ModuleEnv>) -> bool {
        match (self.top(), env) {
            (None, None) => true,
            (Some(top), Some(env)) => top.ptr_eq(env),
            _ => false,
        }
    }

    /// Decide whether `env` may be entered now.
    pub fn check_enter(&self, env: &ModuleEnv) -> Result<(), UsageError> {
        let parent = env.parent();
        if env.kind() == EnvKind::Inverse && !self.is_top(parent) {
            return Err(UsageError::InverseOutsideParent);
        }
        if env.kind() == EnvKind::Primary
            && self.top().is_some_and(|top| top.kind() == EnvKind::Primary)
        {
            return Err(UsageError::NestedPrimary);
        }
        if parent.is_some() && !self.is_top(parent) {
            return Err(UsageError::ChildOutsideParent);
        }
        Ok(())
    }

    pub fn push(&mut self, env: ModuleEnv) {
        self.frames.push(Frame::Entered(env));
    }

    /// Pop the top frame. The ambient frame is never removed.
    pub fn pop(&mut self) -> Option<ModuleEnv> {
        if self.depth() == 0 {
            return None;
        }
        match self.frames.pop() {
            Some(Frame::Entered(env)) => Some(env),
            _ => None,
        }
    }
}
