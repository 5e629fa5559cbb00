use std::fs;

use indoc::indoc;
use pyjava_lib::Options;

use super::config::{Config, DEFAULT_CONFIG_FILE, resolve_config_path};
use crate::error::CliError;

#[test]
fn empty_object_keeps_defaults() {
    let config = Config::parse("{}").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.options(), Options::default());
}

#[test]
fn keys_override_defaults() {
    let config = Config::parse(indoc! {r#"
        {
            "requireSemicolons": true,
            "allowNoColonSimpleBlocks": false,
            "forceParensInStatements": true,
            "files": {
                "include": ["src/**.pyj"],
                "exclude": ["**/vendor"]
            }
        }
    "#})
    .unwrap();

    let expected = Options::new()
        .require_semicolons(true)
        .allow_no_colon_simple_blocks(false)
        .force_parens_in_statements(true);
    assert_eq!(config.options(), expected);
    assert_eq!(config.files.include, ["src/**.pyj"]);
    assert_eq!(config.files.exclude, ["**/vendor"]);
}

#[test]
fn unknown_keys_are_ignored() {
    let config = Config::parse(r#"{ "compilerOptions": { "strict": true } }"#).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn wrong_type_is_rejected() {
    let err = Config::parse(r#"{ "requireSemicolons": "yes" }"#).unwrap_err();
    assert!(matches!(err, CliError::InvalidConfig(_)));
    assert!(err.to_string().starts_with("invalid config file: invalid type"));
}

#[test]
fn non_object_is_rejected() {
    let err = Config::parse("[1, 2]").unwrap_err();
    insta::assert_snapshot!(err, @"invalid config file: expected top-level JSON to be an object");
}

#[test]
fn malformed_json_is_rejected() {
    let err = Config::parse("{ \"files\": ").unwrap_err();
    assert!(matches!(err, CliError::InvalidConfig(_)));
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.json");
    fs::write(&path, r#"{ "forceParensInReturnYieldRaise": true }"#).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(
        config.options(),
        Options::new().force_parens_in_return_yield_raise(true)
    );
}

#[test]
fn explicit_config_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let err = resolve_config_path(Some(&missing)).unwrap_err();
    assert!(matches!(err, CliError::NotFound(_)));
}

#[test]
fn explicit_config_must_be_a_file() {
    let dir = tempfile::tempdir().unwrap();

    let err = resolve_config_path(Some(dir.path())).unwrap_err();
    assert!(matches!(err, CliError::NotAFile(_)));
}

#[test]
fn explicit_config_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(&path, "{}").unwrap();

    assert_eq!(resolve_config_path(Some(&path)).unwrap(), Some(path));
}
