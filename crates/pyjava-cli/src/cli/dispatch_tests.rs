//! Tests for CLI dispatch logic.

use std::path::PathBuf;

use log::LevelFilter;

use super::*;
use crate::commands::transpile::TranspileArgs;

#[test]
fn no_arguments_is_accepted() {
    let m = build_cli().try_get_matches_from(["pyjava"]).unwrap();
    let params = TranspileParams::from_matches(&m);

    assert!(params.inputs.is_empty());
    assert_eq!(params.config, None);
    assert_eq!(params.output, None);
    assert_eq!(params.color, ColorChoice::Auto);
    assert_eq!(params.log_level(), LevelFilter::Warn);
}

#[test]
fn params_extraction() {
    let m = build_cli()
        .try_get_matches_from([
            "pyjava",
            "-c",
            "ci.json",
            "-o",
            "build",
            "src",
            "main.pyj",
            "lib/**.pyj",
        ])
        .unwrap();
    let params = TranspileParams::from_matches(&m);

    assert_eq!(params.config, Some(PathBuf::from("ci.json")));
    assert_eq!(params.output, Some(PathBuf::from("build")));
    assert_eq!(params.inputs, ["src", "main.pyj", "lib/**.pyj"]);
}

#[test]
fn duplicate_config_is_rejected() {
    let result = build_cli().try_get_matches_from(["pyjava", "-c", "a.json", "-c", "b.json"]);
    assert!(result.is_err());
}

#[test]
fn duplicate_output_is_rejected() {
    let result = build_cli().try_get_matches_from(["pyjava", "-o", "a", "--output", "b"]);
    assert!(result.is_err());
}

#[test]
fn inputs_after_double_dash() {
    let m = build_cli()
        .try_get_matches_from(["pyjava", "--", "-weird.pyj"])
        .unwrap();
    let params = TranspileParams::from_matches(&m);
    assert_eq!(params.inputs, ["-weird.pyj"]);
}

#[test]
fn verbose_levels() {
    let level = |args: &[&str]| {
        let m = build_cli().try_get_matches_from(args).unwrap();
        TranspileParams::from_matches(&m).log_level()
    };

    assert_eq!(level(&["pyjava", "-v"]), LevelFilter::Info);
    assert_eq!(level(&["pyjava", "-vv"]), LevelFilter::Debug);
    assert_eq!(level(&["pyjava", "-vvvv"]), LevelFilter::Trace);
}

#[test]
fn color_choice() {
    let m = build_cli()
        .try_get_matches_from(["pyjava", "--color", "always"])
        .unwrap();
    let args: TranspileArgs = TranspileParams::from_matches(&m).into();
    assert!(args.color);

    let m = build_cli()
        .try_get_matches_from(["pyjava", "--color", "never"])
        .unwrap();
    let args: TranspileArgs = TranspileParams::from_matches(&m).into();
    assert!(!args.color);

    let result = build_cli().try_get_matches_from(["pyjava", "--color", "sometimes"]);
    assert!(result.is_err());
}

#[test]
fn help_lists_examples() {
    let help = build_cli().render_long_help().to_string();
    assert!(help.contains("EXAMPLES:"));
    assert!(help.contains("--config"));
    assert!(help.contains("--output"));
}
