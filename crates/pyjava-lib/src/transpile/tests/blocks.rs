use indoc::indoc;

use super::{python, python_with};
use crate::{Error, Options, transpile};

#[test]
fn every_block_form_renders_the_same() {
    let inputs = [
        indoc! {"
            if (x < 10) {
                print(x);
            }
        "},
        indoc! {"
            if (x < 10):
                print(x);
        "},
        "if (x < 10): print(x);\n",
        indoc! {"
            if (x < 10)
                print(x)
        "},
        "if (x < 10) print(x);\n",
    ];

    for input in inputs {
        assert_eq!(python(input), "if (x < 10):\n    print(x)\n", "input:\n{input}");
    }
}

#[test]
fn empty_bodies() {
    let input = indoc! {"
        def f() {}
        def g() { ... }
        class A {}
        if x {}
        for i in r {} else {}
        try {} except {} finally {}
        with ctx {}
    "};

    insta::assert_snapshot!(python(input), @r"
    def f():
        pass
    def g(): ...
    class A:
        pass
    if x: pass
    for i in r: pass
    else: pass
    try: pass
    except: pass
    finally: pass
    with ctx: pass
    ");
}

#[test]
fn ellipsis_only_shortens_functions() {
    let input = indoc! {"
        if x { ... }
        def f() {
            ...
        }
    "};

    insta::assert_snapshot!(python(input), @r"
    if x:
        ...
    def f(): ...
    ");
}

#[test]
fn empty_statements_become_pass() {
    let input = indoc! {"
        while busy() ;
        def f() { ; }
    "};

    insta::assert_snapshot!(python(input), @r"
    while busy():
        pass
    def f():
        pass
    ");
}

#[test]
fn colon_pass_stays_inline() {
    insta::assert_snapshot!(python("if x: pass\n"), @"if x: pass");
}

#[test]
fn clauses_after_indented_bodies() {
    let input = indoc! {"
        if a:
            if b:
                one()
            else:
                two()
        else:
            three()
    "};

    insta::assert_snapshot!(python(input), @r"
    if a:
        if b:
            one()
        else:
            two()
    else:
        three()
    ");
}

#[test]
fn semicolon_after_brace_block_is_swallowed() {
    let input = indoc! {"
        if a { b() };
        c();
    "};

    let options = Options::default().require_semicolons(true);
    insta::assert_snapshot!(python_with(input, options), @r"
    if a:
        b()
    c()
    ");
}

#[test]
fn disabled_simple_blocks_are_rejected() {
    let no_colon = Options::default().allow_no_colon_simple_blocks(false);
    assert!(matches!(
        transpile("if x print(x)\n", &no_colon),
        Err(Error::Parse(_))
    ));

    let no_simple = Options::default().allow_colon_simple_blocks(false);
    assert!(matches!(
        transpile("if x: print(x)\n", &no_simple),
        Err(Error::Parse(_))
    ));
    assert_eq!(
        python_with("if x:\n    print(x)\n", no_simple),
        "if x:\n    print(x)\n"
    );
}
