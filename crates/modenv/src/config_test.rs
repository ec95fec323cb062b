// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

#[rstest]
fn test_default_config() {
    let config = EnvConfig::default();
    assert_eq!(
        config.sys_attrs,
        vec!["meta_path", "path_hooks", "path", "path_importer_cache"]
    );
}

#[rstest]
fn test_modules_only() {
    assert!(EnvConfig::modules_only().sys_attrs.is_empty());
}

#[rstest]
fn test_builder() {
    let config = EnvConfig::new(["path"]).with_attr("plugin_path");
    assert_eq!(config.sys_attrs, vec!["path", "plugin_path"]);
}

#[rstest]
#[case("{}", EnvConfig::default())]
#[case("sys_attrs: []", EnvConfig::modules_only())]
#[case("sys_attrs: [path, meta_path]", EnvConfig::new(["path", "meta_path"]))]
fn test_deserialize(#[case] yaml: &str, #[case] expected: EnvConfig) {
    let config: EnvConfig = serde_yaml::from_str(yaml).expect("Should parse config");
    assert_eq!(config, expected);
}
