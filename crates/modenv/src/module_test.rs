// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

#[rstest]
fn test_module_identity() {
    let a = Module::new("json");
    let b = Module::new("json");
    assert!(a.ptr_eq(&a.clone()));
    assert!(!a.ptr_eq(&b));
    assert_eq!(a.name(), b.name());
    assert!(a.origin().is_none());
}

#[rstest]
fn test_module_origin() {
    let module = Module::with_origin("json", "/lib/json.mod");
    assert_eq!(module.origin(), Some("/lib/json.mod"));
}

#[rstest]
fn test_cache_keeps_insertion_order() {
    let cache = ModuleCache::new();
    cache.insert(Module::new("b"));
    cache.insert(Module::new("a"));
    cache.insert(Module::new("c"));
    assert_eq!(cache.names(), vec!["b", "a", "c"]);

    assert!(cache.remove("a").is_some());
    assert_eq!(cache.names(), vec!["b", "c"]);
    assert_eq!(cache.len(), 2);
}

#[rstest]
fn test_cache_insert_displaces() {
    let cache = ModuleCache::new();
    let first = Module::new("json");
    assert!(cache.insert(first.clone()).is_none());
    let displaced = cache.insert(Module::new("json")).expect("displaced");
    assert!(displaced.ptr_eq(&first));
}

#[rstest]
fn test_get_or_insert_keeps_existing() {
    let cache = ModuleCache::new();
    let first = Module::new("json");
    cache.insert(first.clone());
    let kept = cache.get_or_insert("json", Module::new("json"));
    assert!(kept.ptr_eq(&first));
}

#[rstest]
fn test_replace_contents_keeps_container() {
    let cache = ModuleCache::new();
    let other_handle = cache.clone();
    cache.insert(Module::new("old"));

    let mut entries = IndexMap::new();
    entries.insert("new".to_string(), Module::new("new"));
    cache.replace_contents(entries);

    assert!(other_handle.ptr_eq(&cache));
    assert_eq!(other_handle.names(), vec!["new"]);
    assert!(!ModuleCache::new().ptr_eq(&cache));
}

#[rstest]
fn test_entries_are_detached() {
    let cache = ModuleCache::new();
    cache.insert(Module::new("json"));
    let copy = cache.entries();
    cache.insert(Module::new("toml"));
    assert_eq!(copy.len(), 1);
    assert!(cache.contains("toml"));
}
