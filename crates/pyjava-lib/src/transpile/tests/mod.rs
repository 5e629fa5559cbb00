mod anonymous_classes;
mod blocks;
mod force_parens;

use crate::{Options, transpile};

pub(super) fn python(input: &str) -> String {
    python_with(input, Options::default())
}

pub(super) fn python_with(input: &str, options: Options) -> String {
    match transpile(input, &options) {
        Ok(output) => output,
        Err(err) => panic!("transpile failed: {err}"),
    }
}

/// Transpiling the output again gives the same text.
mod fixed_point {
    use indoc::indoc;

    use super::python;

    fn assert_fixed_point(input: &str) {
        let once = python(input);
        let twice = python(&once);
        assert_eq!(once, twice, "output of the first pass:\n{once}");
    }

    #[test]
    fn blocks_and_comments() {
        assert_fixed_point(indoc! {r#"
            # header
            def f(a, b=1, *args, c: int, **kw) -> int {
                if a { pass } elif b { return 1 } else # note
                {
                    return 2
                }
                while a: a -= 1
                for x in range(3) { print(x, end="") }
                try { g() } except E as e {} finally { h() }
            }
            class A(B) {}
            x = [1, 2,]
            y = { "k": v, **rest }
        "#});
    }

    #[test]
    fn hoisted_declarations() {
        assert_fixed_point(indoc! {r#"
            items.sort(key=lambda item { print(item); return item.key; })
            obj = class(Base)("arg") { def m(self) { pass; } }
            match cmd {
                case [x, *rest] if x: print(rest)
                case { "a": 1, **kw } | Point(x=0): pass
                case _ {}
            }
        "#});
    }
}
