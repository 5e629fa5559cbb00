//! Lexer for PyJava.
//!
//! Produces span-based tokens without storing text; text is sliced from the
//! source only when needed. Every token lands on one of two channels: the
//! default channel feeds the grammar, the hidden channel (whitespace,
//! newlines, comments) is kept for comment reattachment and line-break
//! queries.
//!
//! A newline inside parentheses or square brackets is reclassified as plain
//! whitespace so it never terminates a statement.

use std::ops::Range;

use logos::Logos;
use rowan::TextRange;

use super::brackets::BracketStack;
use super::cst::SyntaxKind;
use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Default,
    Hidden,
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }

    #[inline]
    pub fn channel(&self) -> Channel {
        if self.kind.is_trivia() {
            Channel::Hidden
        } else {
            Channel::Default
        }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Streaming lexer with bracket tracking.
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, SyntaxKind>,
    brackets: BracketStack,
    last_default: Option<SyntaxKind>,
    pending: Option<Token>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            inner: SyntaxKind::lexer(source),
            brackets: BracketStack::new(),
            last_default: None,
            pending: None,
        }
    }

    /// True until the first default-channel token has been produced.
    pub fn is_start_of_file(&self) -> bool {
        self.last_default.is_none()
    }

    pub fn brackets(&self) -> &BracketStack {
        &self.brackets
    }

    /// Next token; unrecognized input is coalesced into one `Garbage` token.
    pub fn next_token(&mut self) -> Option<Token> {
        if let Some(token) = self.pending.take() {
            return Some(self.classify(token));
        }

        let mut error_start: Option<usize> = None;
        loop {
            match self.inner.next() {
                Some(Ok(kind)) => {
                    let token = Token::new(kind, range_to_text_range(self.inner.span()));
                    if let Some(start) = error_start {
                        self.pending = Some(token);
                        let end = self.inner.span().start;
                        return Some(Token::new(
                            SyntaxKind::Garbage,
                            range_to_text_range(start..end),
                        ));
                    }
                    return Some(self.classify(token));
                }
                Some(Err(())) => {
                    error_start.get_or_insert(self.inner.span().start);
                }
                None => {
                    return error_start.map(|start| {
                        Token::new(
                            SyntaxKind::Garbage,
                            range_to_text_range(start..self.source.len()),
                        )
                    });
                }
            }
        }
    }

    fn classify(&mut self, mut token: Token) -> Token {
        let text = token_text(self.source, &token);
        match token.kind {
            SyntaxKind::ParenOpen | SyntaxKind::BracketOpen | SyntaxKind::BraceOpen => {
                self.brackets.enter(first_char(text));
            }
            SyntaxKind::ParenClose | SyntaxKind::BracketClose | SyntaxKind::BraceClose => {
                self.brackets.exit(first_char(text));
            }
            SyntaxKind::Newline if self.brackets.in_parens_or_square_brackets() => {
                token.kind = SyntaxKind::Whitespace;
            }
            _ => {}
        }
        if token.channel() == Channel::Default {
            self.last_default = Some(token.kind);
        }
        token
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

fn first_char(text: &str) -> char {
    text.chars().next().unwrap_or_default()
}

/// Tokenizes the whole source. Unrecognized input is a lexical error.
pub fn lex(source: &str) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    for token in Lexer::new(source) {
        if token.kind == SyntaxKind::Garbage {
            return Err(Error::Lex {
                message: garbage_message(token_text(source, &token)),
                span: token.span,
            });
        }
        tokens.push(token);
    }
    Ok(tokens)
}

fn garbage_message(text: &str) -> String {
    if text.starts_with("#{") {
        "unterminated block comment".to_owned()
    } else if text.starts_with(['\'', '"']) || text.get(1..).is_some_and(|t| t.starts_with(['\'', '"'])) {
        "unterminated string literal".to_owned()
    } else {
        format!("unrecognized character '{}'", first_char(text))
    }
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'q>(source: &'q str, token: &Token) -> &'q str {
    &source[std::ops::Range::<usize>::from(token.span)]
}

/// A numeric literal with a `j`/`J` suffix.
#[inline]
pub fn is_imaginary_number(text: &str) -> bool {
    text.ends_with(['j', 'J'])
}

#[inline]
pub fn is_real_number(text: &str) -> bool {
    !is_imaginary_number(text)
}
