// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::{EnvConfig, Registry};

fn root() -> ModuleEnv {
    ModuleEnv::in_registry(Arc::new(Registry::new()), &EnvConfig::modules_only())
}

#[rstest]
fn test_empty_stack_is_ambient() {
    let stack = ActiveStack::new();
    assert_eq!(stack.depth(), 0);
    assert!(stack.top().is_none());
    assert!(stack.is_top(None));
}

#[rstest]
fn test_ambient_frame_is_never_popped() {
    let mut stack = ActiveStack::new();
    assert!(stack.pop().is_none());
    assert_eq!(stack.depth(), 0);
}

#[rstest]
fn test_push_and_pop() {
    let env = root();
    let mut stack = ActiveStack::new();
    stack.push(env.clone());
    assert!(stack.is_top(Some(&env)));
    assert!(!stack.is_top(None));
    assert!(stack.pop().expect("entered").ptr_eq(&env));
    assert!(stack.is_top(None));
}

#[rstest]
fn test_root_primary_allowed_on_ambient() {
    let stack = ActiveStack::new();
    assert_eq!(stack.check_enter(&root()), Ok(()));
}

#[rstest]
fn test_inverse_needs_parent_on_top() {
    let env = root();
    let inv = env.inverse();
    let mut stack = ActiveStack::new();
    assert_eq!(stack.check_enter(&inv), Err(UsageError::InverseOutsideParent));
    stack.push(env);
    assert_eq!(stack.check_enter(&inv), Ok(()));
}

#[rstest]
fn test_primary_blocked_by_any_primary() {
    let env = root();
    let mut stack = ActiveStack::new();
    stack.push(env.clone());
    assert_eq!(stack.check_enter(&env), Err(UsageError::NestedPrimary));
    assert_eq!(stack.check_enter(&root()), Err(UsageError::NestedPrimary));
}

#[rstest]
fn test_derived_primary_needs_parent_on_top() {
    let env = root();
    let inv = env.inverse();
    let forward = inv.inverse();
    let mut stack = ActiveStack::new();
    assert_eq!(stack.check_enter(&forward), Err(UsageError::ChildOutsideParent));

    stack.push(env.clone());
    stack.push(env.inverse());
    assert_eq!(stack.check_enter(&forward), Err(UsageError::ChildOutsideParent));

    stack.pop();
    stack.push(inv);
    assert_eq!(stack.check_enter(&forward), Ok(()));
}

#[rstest]
fn test_derived_primary_on_primary_reports_nesting_first() {
    let env = root();
    let forward = env.inverse().inverse();
    let mut stack = ActiveStack::new();
    stack.push(env);
    assert_eq!(stack.check_enter(&forward), Err(UsageError::NestedPrimary));
}
