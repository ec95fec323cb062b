// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

#[rstest]
fn test_list_edits() {
    let list = SearchList::new(["/lib", "/usr/lib"]);
    list.push("/opt/lib");
    list.insert(0, "/first");
    list.insert(99, "/last");
    assert_eq!(
        list.entries(),
        vec!["/first", "/lib", "/usr/lib", "/opt/lib", "/last"]
    );

    assert!(list.remove("/usr/lib"));
    assert!(!list.remove("/usr/lib"));
    assert!(!list.contains("/usr/lib"));
    assert_eq!(list.last().as_deref(), Some("/last"));
    assert_eq!(list.len(), 4);
}

#[rstest]
fn test_clones_share_the_list() {
    let list = SearchList::default();
    let alias = list.clone();
    alias.push("/lib");
    assert!(list.ptr_eq(&alias));
    assert_eq!(list.entries(), vec!["/lib"]);
}

#[rstest]
fn test_detached_copy_is_independent() {
    let list = SearchList::new(["/lib"]);
    let copy = list.detached();
    list.push("/later");
    assert!(!copy.ptr_eq(&list));
    assert_eq!(copy.entries(), vec!["/lib"]);
    assert!(SearchList::default().is_empty());
}
