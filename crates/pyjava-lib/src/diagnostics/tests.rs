use rowan::TextRange;

use super::*;
use crate::{Options, parse};

fn parse_error(source: &str, options: &Options) -> Error {
    parse(source, options).expect_err("source should not parse")
}

#[test]
fn diagnostic_display() {
    let diagnostic = Diagnostic::new("expected '}'", Some(TextRange::new(3.into(), 4.into())));
    insta::assert_snapshot!(diagnostic, @"error at 3..4: expected '}'");

    let diagnostic = Diagnostic::new("recursion limit exceeded", None);
    insta::assert_snapshot!(diagnostic, @"error: recursion limit exceeded");
}

#[test]
fn parse_error_names_found_token_and_rule() {
    let error = parse_error("from os 3\n", &Options::default());
    let diagnostics = error.diagnostics();
    assert_eq!(diagnostics.len(), 1);

    let diagnostic = diagnostics.iter().next().expect("one diagnostic");
    assert_eq!(diagnostic.message, "expected 'import'");
    assert_eq!(diagnostic.range, Some(TextRange::new(8.into(), 9.into())));
    assert_eq!(diagnostic.label.as_deref(), Some("found '3'"));
    assert_eq!(
        diagnostic.related,
        vec![RelatedInfo {
            range: TextRange::new(0.into(), 4.into()),
            message: "in import statement".to_owned(),
        }]
    );
}

#[test]
fn failure_at_rule_start_has_no_related_info() {
    let error = parse_error("x = 1 y = 2\n", &Options::default());
    let diagnostics = Diagnostics::from(&error);
    let diagnostic = diagnostics.iter().next().expect("one diagnostic");
    assert!(diagnostic.related.is_empty());
}

#[test]
fn render_parse_error() {
    let source = "x = 1 y = 2";
    let error = parse_error(source, &Options::default());

    insta::assert_snapshot!(error.diagnostics().printer().source(source).render(), @r"
    error: expected semicolon or line break
      |
    1 | x = 1 y = 2
      |       ^ found 'y'
    ");
}

#[test]
fn render_lex_error() {
    let source = "x = $";
    let error = parse_error(source, &Options::default());
    assert!(matches!(error, Error::Lex { .. }));

    insta::assert_snapshot!(error.diagnostics().printer().source(source).render(), @r"
    error: unrecognized character '$'
      |
    1 | x = $
      |     ^
    ");
}

#[test]
fn render_without_source_is_plain() {
    let error = parse_error("x = 1 y = 2", &Options::default());
    insta::assert_snapshot!(
        error.diagnostics().printer().render(),
        @"error at 6..7: expected semicolon or line break"
    );
}

#[test]
fn render_error_without_position() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(Diagnostic::from(&Error::RecursionLimitExceeded));

    let result = diagnostics.printer().source("x = 1").render();
    insta::assert_snapshot!(result, @"error: recursion limit exceeded");
}

#[test]
fn collected_diagnostics_are_separated() {
    let mut diagnostics = Diagnostics::new();
    assert!(diagnostics.is_empty());
    diagnostics.push(Diagnostic::new("first", Some(TextRange::new(0.into(), 1.into()))));
    diagnostics.extend(Diagnostics::from(&Error::RecursionLimitExceeded));

    assert_eq!(diagnostics.len(), 2);
    insta::assert_snapshot!(diagnostics.printer().render(), @r"
    error at 0..1: first
    error: recursion limit exceeded
    ");
}
