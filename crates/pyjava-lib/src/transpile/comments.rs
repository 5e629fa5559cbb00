//! Comment reformatting.
//!
//! Output only has line comments. A comment that owns whole lines (before a
//! statement, inside a block) becomes one `#` line per source line; a comment
//! in trailing position is folded into a single line.

use crate::ast::{Comment, CommentKind};

use super::Transpiler;

impl Transpiler {
    /// Each comment on its own line(s) at the current indentation.
    pub(super) fn comment_lines(&mut self, comments: &[Comment]) {
        for comment in comments {
            for line in own_line_text(comment) {
                self.w().append(&line).newline();
            }
        }
    }

    /// `text # comment` on the current line.
    pub(super) fn trailing_comment(&mut self, comment: Option<&Comment>) {
        if let Some(comment) = comment {
            let text = trailing_text(comment);
            self.w().append_char(' ').append(&text);
        }
    }
}

/// Lines for a comment that stands on its own.
pub(super) fn own_line_text(comment: &Comment) -> Vec<String> {
    match comment.kind {
        CommentKind::Line => vec![line_comment_text(&comment.text)],
        CommentKind::Block => block_comment_lines(comment),
    }
}

/// Single-line form of a comment that follows code.
pub(super) fn trailing_text(comment: &Comment) -> String {
    match comment.kind {
        CommentKind::Line => line_comment_text(&comment.text),
        CommentKind::Block => {
            let words: Vec<&str> = block_comment_body(&comment.text)
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();
            if words.is_empty() {
                return "#".to_owned();
            }
            format!("# {}", words.join(" "))
        }
    }
}

/// `#text` gains a space; `#!`, `##` and `#  text` are kept as written.
fn line_comment_text(text: &str) -> String {
    let body = text.strip_prefix('#').unwrap_or(text).trim_end();
    match body.chars().next() {
        None => "#".to_owned(),
        Some(c) if c.is_whitespace() || c == '!' || c == '#' => format!("#{body}"),
        Some(_) => format!("# {body}"),
    }
}

fn block_comment_body(text: &str) -> &str {
    let text = text.strip_prefix("#{").unwrap_or(text);
    text.strip_suffix("#}").unwrap_or(text)
}

/// One source line of a block comment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BodyLine<'a> {
    /// Source column of the first character of `text`.
    column: usize,
    /// Trimmed on both sides; empty for blank lines.
    text: &'a str,
}

impl<'a> BodyLine<'a> {
    fn new(raw: &'a str, start_column: usize) -> Self {
        let text = raw.trim_start();
        let column = start_column + raw.chars().count() - text.chars().count();
        Self {
            column,
            text: text.trim_end(),
        }
    }

    fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// The same line with its leading `#` removed.
    fn without_hash(self) -> Self {
        let rest = &self.text[1..];
        if rest.trim().is_empty() {
            return Self {
                column: self.column,
                text: "",
            };
        }
        Self::new(rest, self.column + 1)
    }
}

fn block_comment_lines(comment: &Comment) -> Vec<String> {
    let body = block_comment_body(&comment.text);
    let mut lines: Vec<BodyLine<'_>> = body
        .split('\n')
        .enumerate()
        .map(|(i, raw)| {
            // text on the `#{` line starts after the delimiter
            let start = if i == 0 { comment.column + 2 } else { 0 };
            BodyLine::new(raw, start)
        })
        .collect();

    while lines.first().is_some_and(BodyLine::is_blank) {
        lines.remove(0);
    }
    while lines.last().is_some_and(BodyLine::is_blank) {
        lines.pop();
    }
    if lines.is_empty() {
        return Vec::new();
    }

    if has_hash_margin(&lines) {
        lines = lines
            .into_iter()
            .map(|line| if line.is_blank() { line } else { line.without_hash() })
            .collect();
    }

    let margin = lines
        .iter()
        .filter(|line| !line.is_blank())
        .map(|line| line.column)
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if line.is_blank() {
                return "#".to_owned();
            }
            let padding = " ".repeat(line.column - margin);
            format!("# {padding}{}", line.text)
        })
        .collect()
}

/// Every non-blank line starts with `#`, all in one column.
fn has_hash_margin(lines: &[BodyLine<'_>]) -> bool {
    let mut columns = lines
        .iter()
        .filter(|line| !line.is_blank())
        .map(|line| line.text.starts_with('#').then_some(line.column));
    let Some(Some(first)) = columns.next() else {
        return false;
    };
    columns.all(|column| column == Some(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn line(text: &str) -> Comment {
        Comment {
            kind: CommentKind::Line,
            text: text.to_owned(),
            column: 0,
        }
    }

    fn block(text: &str, column: usize) -> Comment {
        Comment {
            kind: CommentKind::Block,
            text: text.to_owned(),
            column,
        }
    }

    fn own_lines(comment: &Comment) -> String {
        own_line_text(comment).join("\n")
    }

    #[test]
    fn line_comment_spacing() {
        assert_eq!(trailing_text(&line("#Comment")), "# Comment");
        assert_eq!(trailing_text(&line("# Comment  ")), "# Comment");
        assert_eq!(trailing_text(&line("#")), "#");
        assert_eq!(trailing_text(&line("#   ")), "#");
        assert_eq!(trailing_text(&line("#!/usr/bin/env python")), "#!/usr/bin/env python");
        assert_eq!(trailing_text(&line("## section")), "## section");
        assert_eq!(trailing_text(&line("#    indented")), "#    indented");
    }

    #[test]
    fn block_comment_indented_style() {
        let comment = block(
            indoc! {"
                #{
                    Block comment
                    style #1:
                     indented
                #}"},
            0,
        );
        insta::assert_snapshot!(own_lines(&comment), @r"
        # Block comment
        # style #1:
        #  indented
        ");
    }

    #[test]
    fn block_comment_hash_margin_is_stripped() {
        let comment = block(
            indoc! {"
                #{
                # Block comment
                # style #2:
                #  preceding hashtags
                #}"},
            0,
        );
        insta::assert_snapshot!(own_lines(&comment), @r"
        # Block comment
        # style #2:
        #  preceding hashtags
        ");
    }

    #[test]
    fn block_comment_inconsistent_hash_margin_is_kept() {
        let comment = block(
            "#{\n # invalid block\n  # comment preceding\n  #hashtags,\n#result may look weird\n #}",
            1,
        );
        insta::assert_snapshot!(own_lines(&comment), @r"
        #  # invalid block
        #   # comment preceding
        #   #hashtags,
        # #result may look weird
        ");
    }

    #[test]
    fn block_comment_text_on_opening_line() {
        let comment = block(
            indoc! {"
                #{ Block comment
                   style #3:
                    first text line is on same
                    line as opening brace
                #}"},
            0,
        );
        insta::assert_snapshot!(own_lines(&comment), @r"
        # Block comment
        # style #3:
        #  first text line is on same
        #  line as opening brace
        ");
    }

    #[test]
    fn block_comment_opening_column_counts() {
        let comment = block("#{ first\n        second #}", 4);
        insta::assert_snapshot!(own_lines(&comment), @r"
        # first
        #  second
        ");
    }

    #[test]
    fn block_comment_blank_interior_line() {
        let comment = block("#{\n  one\n\n  two\n#}", 0);
        insta::assert_snapshot!(own_lines(&comment), @r"
        # one
        #
        # two
        ");
    }

    #[test]
    fn empty_block_comment() {
        assert!(own_line_text(&block("#{#}", 0)).is_empty());
        assert!(own_line_text(&block("#{\n   \n#}", 0)).is_empty());
        assert_eq!(trailing_text(&block("#{ #}", 0)), "#");
    }

    #[test]
    fn block_comment_in_trailing_position() {
        let comment = block(
            "#{ Block comment\n         following statement \n         is treated special #}",
            6,
        );
        assert_eq!(
            trailing_text(&comment),
            "# Block comment following statement is treated special"
        );
    }
}
