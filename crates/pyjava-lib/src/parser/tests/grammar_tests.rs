use std::time::{Duration, Instant};

use indoc::indoc;

use super::{file, file_with};
use crate::Options;
use crate::ast::{BlockForm, CallArgs, CommentKind, Expr, Stmt, StmtKind};

fn name(s: &str) -> Expr {
    Expr::Name(s.to_owned())
}

fn if_parts(stmt: &Stmt) -> &crate::ast::If {
    match &stmt.kind {
        StmtKind::If(i) => i,
        other => panic!("expected an if statement, got {other:?}"),
    }
}

#[test]
fn block_forms() {
    let parsed = file(indoc! {"
        if a { b }
        if a: b
        if a:
            b
        if a b
    "});

    let forms: Vec<_> = parsed.body.iter().map(|s| if_parts(s).body.form).collect();
    assert_eq!(
        forms,
        [
            BlockForm::Brace,
            BlockForm::ColonSimple,
            BlockForm::ColonIndented,
            BlockForm::NoColon
        ]
    );
}

#[test]
fn colon_pass_body_is_empty() {
    let parsed = file("if x: pass\n");
    assert!(if_parts(&parsed.body[0]).body.items.is_empty());

    let parsed = file("if x pass\n");
    assert_eq!(if_parts(&parsed.body[0]).body.items.len(), 1);
}

#[test]
fn lone_semicolon_is_pass() {
    let parsed = file(";");
    assert_eq!(parsed.body.len(), 1);
    assert_eq!(parsed.body[0].kind, StmtKind::Pass);
}

#[test]
fn semicolon_after_brace_block_is_swallowed() {
    let parsed = file("if a { b };\nc");
    assert_eq!(parsed.body.len(), 2);
}

#[test]
fn closing_brace_ends_statement_under_required_semicolons() {
    let options = Options::new().require_semicolons(true);
    let parsed = file_with("if x { y = 1 }", options);
    assert_eq!(if_parts(&parsed.body[0]).body.items.len(), 1);
}

#[test]
fn comments_are_claimed_once() {
    let parsed = file(indoc! {"
        # lead
        x = 1 # trail
        #{ block #} y
        # end
    "});

    let first = &parsed.body[0];
    assert_eq!(first.leading.len(), 1);
    assert_eq!(first.leading[0].text, "# lead");
    assert_eq!(first.leading[0].column, 0);
    assert_eq!(first.trailing.as_ref().map(|c| c.text.as_str()), Some("# trail"));

    let second = &parsed.body[1];
    assert_eq!(second.leading.len(), 1);
    assert_eq!(second.leading[0].kind, CommentKind::Block);

    assert_eq!(parsed.dangling.len(), 1);
    assert_eq!(parsed.dangling[0].text, "# end");
}

#[test]
fn clauses_attach_by_indentation() {
    let parsed = file(indoc! {"
        if a:
            if b:
                x
        else:
            y
    "});

    let outer = if_parts(&parsed.body[0]);
    assert!(outer.orelse.is_some());
    let inner = if_parts(&outer.body.items[0]);
    assert!(inner.orelse.is_none());
}

#[test]
fn parenthesized_condition_keeps_its_group() {
    let parsed = file("if (a) { pass }\nif (a) or b { pass }\n");

    assert_eq!(
        if_parts(&parsed.body[0]).test,
        Expr::Group(Box::new(name("a")))
    );
    assert!(matches!(if_parts(&parsed.body[1]).test, Expr::BoolOp { .. }));
}

#[test]
fn parenthesized_for_header_is_dropped() {
    let parsed = file("for (x in xs) { pass }");
    let StmtKind::For(f) = &parsed.body[0].kind else {
        panic!("expected a for statement");
    };
    assert_eq!(f.target, name("x"));
    assert_eq!(f.iter, name("xs"));
}

#[test]
fn match_is_a_soft_keyword() {
    let parsed = file(indoc! {"
        match = 3
        match(x)
        match p {
            case 1 { pass }
            case _ { pass }
        }
    "});

    assert!(matches!(parsed.body[0].kind, StmtKind::Assign { .. }));
    assert!(matches!(
        &parsed.body[1].kind,
        StmtKind::Expr(Expr::Call {
            args: CallArgs::Args(_),
            ..
        })
    ));
    let StmtKind::Match(m) = &parsed.body[2].kind else {
        panic!("expected a match statement");
    };
    assert_eq!(m.subject, name("p"));
    assert_eq!(m.cases.items.len(), 2);
}

#[test]
fn line_break_ends_expression_statement() {
    let parsed = file("a\n(b)\n");
    assert_eq!(parsed.body.len(), 2);
    assert_eq!(parsed.body[0].kind, StmtKind::Expr(name("a")));

    let parsed = file("a(\n  b\n)\n");
    assert_eq!(parsed.body.len(), 1);
}

#[test]
fn forced_parens_accept_parenthesized_forms() {
    let options = Options::new()
        .force_parens_in_statements(true)
        .force_parens_in_return_yield_raise(true);
    let parsed = file_with(
        indoc! {"
            def f(xs) {
                for (x in xs) { del (x) }
                return (1, 2)
            }
        "},
        options,
    );
    assert_eq!(parsed.body.len(), 1);
}

#[test]
fn conditional_tail_needs_an_else_ahead() {
    let parsed = file(indoc! {"
        x = a
        if b { c } else { d }
        y = p
            if q else r
        z = [p if q else r for p in s]
    "});

    let kinds: Vec<_> = parsed
        .body
        .iter()
        .map(|s| match &s.kind {
            StmtKind::Assign { value, .. } => match value {
                Expr::IfExp { .. } => "conditional",
                _ => "assign",
            },
            StmtKind::If(_) => "if",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["assign", "if", "conditional", "assign"]);
}

#[test]
fn parenthesized_with_and_except_headers() {
    let parsed = file(indoc! {"
        with (open(p) as f, g) { pass }
        with (a) as b { pass }
        with (a, b) { pass }
        try { pass } except (A, B) as e { pass } except (C as c) { pass }
    "});

    let items: Vec<_> = parsed.body[..3]
        .iter()
        .map(|s| match &s.kind {
            StmtKind::With(w) => (w.items.len(), w.items[0].target.is_some()),
            other => panic!("expected a with statement, got {other:?}"),
        })
        .collect();
    assert_eq!(items, [(2, true), (1, true), (1, false)]);

    let StmtKind::Try(t) = &parsed.body[3].kind else {
        panic!("expected a try statement");
    };
    assert!(matches!(t.handlers[0].kind, Some(Expr::Tuple { .. })));
    assert_eq!(t.handlers[0].name.as_deref(), Some("e"));
    assert_eq!(t.handlers[1].kind, Some(name("C")));
    assert_eq!(t.handlers[1].name.as_deref(), Some("c"));
}

/// Nests `shape` into itself `depth` times through its `INNER` slot.
fn nest(shape: &str, depth: usize) -> String {
    (0..depth).fold("q".to_owned(), |inner, _| shape.replace("INNER", &inner))
}

#[test]
fn nested_headers_parse_in_linear_time() {
    let shapes = [
        "f(lambda { y = 1\nif g(lambda { INNER }) { q } })",
        "f(lambda { if (g(lambda { INNER })) or c { q } })",
        "f(lambda { for (x in g(lambda { INNER })) { q } })",
        "f(lambda { with (g(lambda { INNER }) as h) { q } })",
        "f(lambda { match(g(lambda { INNER }))\nq })",
    ];

    for shape in shapes {
        let source = format!("{}\n", nest(shape, 24));
        let started = Instant::now();
        file(&source);
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "slow parse of {shape}"
        );
    }
}
