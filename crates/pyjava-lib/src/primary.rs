//! Read-only queries that look through redundant wrappers.
//!
//! All of them are total: a shape they do not recognise yields the fallback
//! (the input itself, or `None`), never an error.

use crate::ast::{Arg, Constant, Expr, Pattern, SequenceKind, Stmt, StmtKind};

/// Name hint for a synthetic class without usable bases.
pub const DEFAULT_CLASS_HINT: &str = "object";

/// Strips any number of enclosing parentheses.
pub fn group_contents(mut expr: &Expr) -> &Expr {
    while let Expr::Group(inner) = expr {
        expr = inner;
    }
    expr
}

/// `a`, `a.b`, `a.b.c`, ...
pub fn is_dotted_name(expr: &Expr) -> bool {
    match expr {
        Expr::Name(_) => true,
        Expr::Attribute { value, .. } => is_dotted_name(value),
        _ => false,
    }
}

/// Last segment of a dotted name, looking through parentheses.
pub fn dotted_name_tail(expr: &Expr) -> Option<&str> {
    match group_contents(expr) {
        Expr::Name(name) => Some(name),
        Expr::Attribute { value, attr } if is_dotted_name(value) => Some(attr),
        _ => None,
    }
}

/// Name hint from the first base of an anonymous class.
///
/// Only a positional dotted name counts; `class(metaclass=M)(...)`,
/// `class(*bases)(...)` and calls fall back to [`DEFAULT_CLASS_HINT`].
pub fn class_name_hint(bases: Option<&[Arg]>) -> &str {
    match bases.and_then(<[Arg]>::first) {
        Some(Arg::Positional(expr)) => dotted_name_tail(expr).unwrap_or(DEFAULT_CLASS_HINT),
        _ => DEFAULT_CLASS_HINT,
    }
}

/// The only statement of a body, when it carries no comments.
fn lone_statement(items: &[Stmt]) -> Option<&StmtKind> {
    match items {
        [stmt] if stmt.leading.is_empty() && stmt.trailing.is_none() => Some(&stmt.kind),
        _ => None,
    }
}

/// A body consisting of `...` alone (parentheses allowed) and no comments.
pub fn is_lone_ellipsis(items: &[Stmt]) -> bool {
    matches!(
        lone_statement(items),
        Some(StmtKind::Expr(expr)) if matches!(group_contents(expr), Expr::Constant(Constant::Ellipsis))
    )
}

/// A body consisting of `pass` (or `;`) alone and no comments.
pub fn is_lone_pass(items: &[Stmt]) -> bool {
    matches!(lone_statement(items), Some(StmtKind::Pass))
}

/// Pattern inside one pair of parentheses.
///
/// A group yields its content and a non-empty parenthesized tuple yields the
/// equivalent open sequence (`(a,)` keeps its comma). Everything else is
/// returned unchanged.
pub fn pattern_group_contents(pattern: Pattern) -> Pattern {
    match pattern {
        Pattern::Group(inner) => *inner,
        Pattern::Sequence {
            kind: SequenceKind::Tuple,
            elts,
            trailing_comma,
        } if !elts.is_empty() => Pattern::Sequence {
            kind: SequenceKind::Open,
            trailing_comma: trailing_comma || elts.len() == 1,
            elts,
        },
        pattern => pattern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Expr {
        Expr::Name(s.to_owned())
    }

    fn attribute(value: Expr, attr: &str) -> Expr {
        Expr::Attribute {
            value: Box::new(value),
            attr: attr.to_owned(),
        }
    }

    #[test]
    fn hint_from_plain_name() {
        let bases = [Arg::Positional(name("Base"))];
        assert_eq!(class_name_hint(Some(&bases)), "Base");
    }

    #[test]
    fn hint_from_dotted_name_uses_last_segment() {
        let bases = [Arg::Positional(attribute(attribute(name("a"), "b"), "Base"))];
        assert_eq!(class_name_hint(Some(&bases)), "Base");
    }

    #[test]
    fn hint_looks_through_parentheses() {
        let bases = [Arg::Positional(Expr::group(Expr::group(name("Base"))))];
        assert_eq!(class_name_hint(Some(&bases)), "Base");
    }

    #[test]
    fn hint_falls_back_to_object() {
        assert_eq!(class_name_hint(None), "object");
        assert_eq!(class_name_hint(Some(&[])), "object");

        let keyword = [Arg::Keyword {
            name: "metaclass".to_owned(),
            value: name("M"),
        }];
        assert_eq!(class_name_hint(Some(&keyword)), "object");

        let call = [Arg::Positional(Expr::Call {
            func: Box::new(name("make")),
            args: crate::ast::CallArgs::Args(Vec::new()),
        })];
        assert_eq!(class_name_hint(Some(&call)), "object");

        let attribute_of_call = [Arg::Positional(attribute(
            Expr::Call {
                func: Box::new(name("make")),
                args: crate::ast::CallArgs::Args(Vec::new()),
            },
            "Base",
        ))];
        assert_eq!(class_name_hint(Some(&attribute_of_call)), "object");
    }

    #[test]
    fn lone_ellipsis() {
        let stmt = |expr| Stmt::new(StmtKind::Expr(expr));
        let ellipsis = || Expr::Constant(Constant::Ellipsis);

        assert!(is_lone_ellipsis(&[stmt(ellipsis())]));
        assert!(is_lone_ellipsis(&[stmt(Expr::group(ellipsis()))]));
        assert!(!is_lone_ellipsis(&[]));
        assert!(!is_lone_ellipsis(&[stmt(ellipsis()), stmt(ellipsis())]));
        assert!(!is_lone_ellipsis(&[stmt(name("x"))]));
    }

    #[test]
    fn lone_pass_without_comments() {
        let mut pass = Stmt::new(StmtKind::Pass);
        assert!(is_lone_pass(std::slice::from_ref(&pass)));

        pass.trailing = Some(crate::ast::Comment {
            kind: crate::ast::CommentKind::Line,
            text: "# keep".to_owned(),
            column: 6,
        });
        assert!(!is_lone_pass(&[pass]));
        assert!(!is_lone_pass(&[]));
    }

    #[test]
    fn pattern_tuple_becomes_open_sequence() {
        let single = Pattern::Sequence {
            kind: SequenceKind::Tuple,
            elts: vec![Pattern::Capture("x".to_owned())],
            trailing_comma: false,
        };
        assert_eq!(
            pattern_group_contents(single),
            Pattern::Sequence {
                kind: SequenceKind::Open,
                elts: vec![Pattern::Capture("x".to_owned())],
                trailing_comma: true,
            }
        );

        let empty = Pattern::Sequence {
            kind: SequenceKind::Tuple,
            elts: Vec::new(),
            trailing_comma: false,
        };
        assert_eq!(pattern_group_contents(empty.clone()), empty);

        let group = Pattern::Group(Box::new(Pattern::Wildcard));
        assert_eq!(pattern_group_contents(group), Pattern::Wildcard);
    }
}
