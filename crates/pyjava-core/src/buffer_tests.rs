use crate::buffer::Op;
use crate::{AppenderState, BufferError, LazyBuffer, WriteSink};

fn rendered(buffer: &LazyBuffer) -> String {
    buffer.render_to_string().unwrap()
}

#[test]
fn newline_applies_current_indent() {
    let mut buffer = LazyBuffer::new();
    let root = buffer.root();
    buffer
        .at(root)
        .append("if x:")
        .incr_indent()
        .newline()
        .append("y")
        .decr_indent_newline()
        .append("z")
        .newline();

    insta::assert_snapshot!(rendered(&buffer), @r"
    if x:
        y
    z
    ");
}

#[test]
fn complementary_indent_ops_cancel() {
    let mut buffer = LazyBuffer::new();
    let root = buffer.root();
    buffer.at(root).append("a").incr_indent().decr_indent();
    assert_eq!(buffer.ops(root), &[Op::Text { start: 0, end: 1 }]);

    buffer.at(root).decr_indent().incr_indent().incr_indent();
    assert_eq!(buffer.ops(root).last(), Some(&Op::Incr(1)));
}

#[test]
fn repeated_indent_ops_merge() {
    let mut buffer = LazyBuffer::new();
    let root = buffer.root();
    buffer.at(root).incr_indent().incr_indent().incr_indent();
    assert_eq!(buffer.ops(root), &[Op::Incr(3)]);
}

#[test]
fn decr_indent_newline_moves_dedent_before_newline() {
    let mut buffer = LazyBuffer::new();
    let root = buffer.root();
    buffer
        .at(root)
        .incr_indent()
        .append("a")
        .newline()
        .decr_indent_newline();

    assert_eq!(
        buffer.ops(root),
        &[
            Op::Incr(1),
            Op::Text { start: 0, end: 1 },
            Op::Decr(1),
            Op::Newline
        ]
    );
}

#[test]
fn nested_dedents_collapse_into_one_line_break() {
    let mut buffer = LazyBuffer::new();
    let root = buffer.root();
    buffer
        .at(root)
        .append("class A:")
        .incr_indent()
        .newline()
        .append("def f(self):")
        .incr_indent()
        .newline()
        .append("pass")
        .newline()
        .decr_indent_newline()
        .decr_indent_newline()
        .append("x = 1")
        .newline();

    insta::assert_snapshot!(rendered(&buffer), @r"
    class A:
        def f(self):
            pass
    x = 1
    ");
}

#[test]
fn later_segment_renders_at_its_position() {
    let mut buffer = LazyBuffer::new();
    let root = buffer.root();
    let insertion = buffer.at(root).later();
    buffer.at(root).append("foo(__lambda0)").newline();

    buffer
        .at(insertion)
        .append("def __lambda0():")
        .incr_indent()
        .newline()
        .append("return 5")
        .decr_indent_newline();

    insta::assert_snapshot!(rendered(&buffer), @r"
    def __lambda0():
        return 5
    foo(__lambda0)
    ");
}

#[test]
fn later_segment_inherits_indent() {
    let mut buffer = LazyBuffer::new();
    let root = buffer.root();
    buffer.at(root).append("if x:").incr_indent().newline();
    let insertion = buffer.at(root).later();
    buffer.at(root).append("y = f").decr_indent_newline();
    buffer.at(insertion).append("f = 1").newline();

    insta::assert_snapshot!(rendered(&buffer), @r"
    if x:
        f = 1
        y = f
    ");
}

#[test]
fn negative_indent_is_fatal() {
    let mut buffer = LazyBuffer::new();
    let root = buffer.root();
    buffer.at(root).append("x").decr_indent().newline();

    let err = buffer.render_to_string().unwrap_err();
    assert!(matches!(err, BufferError::NegativeIndent));
    assert_eq!(err.to_string(), "cannot decrease indent, already at 0");
}

#[test]
fn render_with_external_state() {
    let mut buffer = LazyBuffer::new();
    let root = buffer.root();
    buffer.at(root).append("a").newline().append("b");

    let mut state = AppenderState { indent: 1 };
    let mut out = String::new();
    buffer.render_with(&mut state, &mut out).unwrap();
    assert_eq!(out, "a\n    b");
}

#[test]
fn render_into_writer() {
    let mut buffer = LazyBuffer::new();
    let root = buffer.root();
    buffer.at(root).append_char('é').append("x = 1").newline();

    let mut sink = WriteSink::new(Vec::new());
    buffer.render(&mut sink).unwrap();
    assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "éx = 1\n");
}

#[test]
fn empty_segments() {
    let mut buffer = LazyBuffer::new();
    let root = buffer.root();
    assert!(buffer.is_empty(root));
    let insertion = buffer.at(root).later();
    assert!(buffer.is_empty(insertion));
    assert!(!buffer.is_empty(root));
    assert_eq!(rendered(&buffer), "");
}
