use indoc::indoc;

use super::python_with;
use crate::Options;

fn forced() -> Options {
    Options::default().force_parens_in_statements(true)
}

fn forced_everywhere() -> Options {
    forced().force_parens_in_return_yield_raise(true)
}

#[test]
fn parens_around_compound_statement_headers() {
    let input = indoc! {"
        if (condition) {
            doStuff1();
        } elif (condition2) {
            doStuff2();
        } else {
            doStuff3();
        }
        while (condition) {
            doStuff4();
        }
        for (var in exprs) {
            doStuff5();
        }
        with (open(filename) as file) {
            doStuff6();
        }
        try {
            doStuff7();
        } except (Exception as e) {
            doStuff8();
        }
        match (exprs) {
            case 0 {
                doStuff9();
            }
            case 1 {
                doStuff10();
            }
        }
    "};

    let options = forced().require_semicolons(true);
    insta::assert_snapshot!(python_with(input, options), @r"
    if (condition):
        doStuff1()
    elif (condition2):
        doStuff2()
    else:
        doStuff3()
    while (condition):
        doStuff4()
    for var in exprs:
        doStuff5()
    with open(filename) as file:
        doStuff6()
    try:
        doStuff7()
    except Exception as e:
        doStuff8()
    match (exprs):
        case 0:
            doStuff9()
        case 1:
            doStuff10()
    ");
}

#[test]
fn negated_forced_condition() {
    insta::assert_snapshot!(python_with("if not (ready) { wait() }\n", forced()), @r"
    if not (ready):
        wait()
    ");
}

#[test]
fn parens_around_simple_statement_operands() {
    let input = indoc! {r#"
        return
        return (x)
        yield
        yield from (y)
        raise
        raise (Exception)
        assert (condition)
        assert (condition, )
        assert (condition, "message")
        del (x.y)
        match (x) {
            case (0) {}
            case (y) {}
            case (a, b) {}
        }
    "#};

    insta::assert_snapshot!(python_with(input, forced_everywhere()), @r#"
    return
    return (x)
    yield
    yield from (y)
    raise
    raise (Exception)
    assert (condition)
    assert (condition)
    assert (condition), ("message")
    del x.y
    match (x):
        case 0: pass
        case y: pass
        case a, b: pass
    "#);
}

#[test]
fn assert_keeps_tuple_without_forced_parens() {
    let input = indoc! {r#"
        assert (condition)
        assert (condition,)
        assert (condition, "message")
    "#};

    insta::assert_snapshot!(python_with(input, Options::default()), @r#"
    assert (condition)
    assert (condition,)
    assert (condition, "message")
    "#);
}

#[test]
fn raise_from_with_forced_parens() {
    insta::assert_snapshot!(
        python_with("raise (Error()) from (cause)\n", forced_everywhere()),
        @"raise (Error()) from (cause)"
    );
}

#[test]
fn case_patterns_need_no_parens_when_headers_are_forced() {
    let input = indoc! {r#"
        match (command) {
            case 0 { stop() }
            case "go" | "move" { go() }
            case (x, y) { at(x, y) }
            case Point(x, y) | (x, y) { at(x, y) }
            case [a, *rest] if a { first(a) }
        }
    "#};

    insta::assert_snapshot!(python_with(input, forced()), @r#"
    match (command):
        case 0:
            stop()
        case "go" | "move":
            go()
        case x, y:
            at(x, y)
        case Point(x, y) | (x, y):
            at(x, y)
        case [a, *rest] if a:
            first(a)
    "#);
}
