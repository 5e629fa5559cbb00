use super::cst::SyntaxKind;
use super::lex;
use super::stream::TokenStream;

fn stream(source: &str) -> TokenStream<'_> {
    match lex(source) {
        Ok(tokens) => TokenStream::new(source, tokens),
        Err(err) => panic!("lexing failed: {err}"),
    }
}

#[test]
fn significant_tokens_end_with_eof() {
    let s = stream("a  b");
    assert_eq!(s.len(), 3);
    assert!(!s.is_empty());
    assert_eq!(s.text(1), "b");
    assert_eq!(s.kind(2), SyntaxKind::Eof);
    assert_eq!(s.kind(100), SyntaxKind::Eof);
    assert_eq!(s.raw_index(1), 2);
}

#[test]
fn trivia_only_source_is_empty() {
    assert!(stream("").is_empty());
    assert!(stream("  # only a comment\n").is_empty());
}

#[test]
fn line_terminators() {
    let s = stream("a\nb c");
    assert!(!s.line_terminator_ahead(0));
    assert!(s.line_terminator_ahead(1));
    assert!(!s.line_terminator_ahead(2));

    let s = stream("a #{ x\n #} b #{ y #} c");
    assert!(s.line_terminator_ahead(1));
    assert!(!s.line_terminator_ahead(2));
}

#[test]
fn trailing_comments_on_same_line() {
    let s = stream("a # c\nb");
    assert_eq!(s.trailing_comments(0), vec![2]);
    assert_eq!(s.raw_text(2), "# c");

    let b = s.raw_index(1);
    assert!(s.trailing_comments(b).is_empty());

    let s = stream("a #{ x #} #{ y #} # z\nb");
    let texts: Vec<_> = s.trailing_comments(0).into_iter().map(|i| s.raw_text(i)).collect();
    assert_eq!(texts, ["#{ x #}", "#{ y #}", "# z"]);

    let s = stream("a #{ x\n #} #{ y #}");
    let texts: Vec<_> = s.trailing_comments(0).into_iter().map(|i| s.raw_text(i)).collect();
    assert_eq!(texts, ["#{ x\n #}"]);
}

#[test]
fn preceding_comments_skip_the_previous_line() {
    let s = stream("a # t\n# own\nb");
    assert_eq!(s.preceding_comments(1), vec![4]);

    let s = stream("# top\nx");
    assert_eq!(s.preceding_comments(0), vec![0]);
}

#[test]
fn line_indent_expands_tabs() {
    let s = stream("if x:\n\tb\n    c");
    let b = s.raw_index(3);
    let c = s.raw_index(4);
    assert_eq!(s.raw_text(b), "b");
    assert_eq!(s.line_indent(b), 8);
    assert_eq!(s.line_indent(c), 4);
    assert_eq!(s.line_indent(0), 0);
}

#[test]
fn column_counts_characters() {
    let s = stream("é = 1");
    let eq = s.raw_index(1);
    assert_eq!(s.column(eq), 2);

    let s = stream("ab\n  cd");
    assert_eq!(s.column(s.raw_index(1)), 2);
}
