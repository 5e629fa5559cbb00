use crate::{TextSink, WriteSink};

#[test]
fn string_sink_appends_ranges() {
    let mut out = String::new();
    out.append_str("def ").unwrap();
    out.append_range("__lambda0()", 0, 9).unwrap();
    out.append_char(':').unwrap();
    assert_eq!(out, "def __lambda0:");
}

#[test]
fn write_sink_encodes_utf8() {
    let mut sink = WriteSink::new(Vec::new());
    sink.append_char('λ').unwrap();
    sink.append_range("x = 1", 1, 5).unwrap();
    assert_eq!(sink.into_inner(), "λ = 1".as_bytes());
}
