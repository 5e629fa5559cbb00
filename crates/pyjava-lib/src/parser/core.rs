//! Parser state and low-level operations.
//!
//! The grammar is recursive descent over default-channel tokens. There is no
//! error recovery: the first violated rule cancels the parse with a
//! [`ParseError`]. Two places speculate (conditional expressions across
//! line breaks, the `match` soft keyword) and rewind on failure; both first
//! check the bracket-paired tokens ahead so a failed attempt stays cheap.

use std::cell::Cell;

use super::cst::{SyntaxKind, TokenSet};
use super::error::ParseError;
use super::stream::TokenStream;
use crate::Error;
use crate::ast::{Comment, CommentKind};
use crate::options::Options;

pub(crate) type PResult<T> = Result<T, Error>;

pub const DEFAULT_RECURSION_LIMIT: u32 = 512;

/// Grammar rule being parsed, kept for error context.
#[derive(Clone, Copy, Debug)]
pub(super) struct Rule {
    pub name: &'static str,
    pub start: usize,
}

/// Snapshot for speculative parsing.
#[derive(Clone, Copy, Debug)]
pub(super) struct Checkpoint {
    pos: usize,
    claims: usize,
    no_matmul: bool,
}

/// Comments handed to the tree, with an undo log for rewinds.
#[derive(Debug, Default)]
struct Claims {
    claimed: Vec<bool>,
    log: Vec<usize>,
}

impl Claims {
    fn new(len: usize) -> Self {
        Self {
            claimed: vec![false; len],
            log: Vec::new(),
        }
    }

    fn is_claimed(&self, raw: usize) -> bool {
        self.claimed[raw]
    }

    fn claim(&mut self, raw: usize) {
        if !self.claimed[raw] {
            self.claimed[raw] = true;
            self.log.push(raw);
        }
    }

    fn rewind(&mut self, len: usize) {
        for raw in self.log.drain(len..) {
            self.claimed[raw] = false;
        }
    }
}

pub struct Parser<'src> {
    pub(super) stream: TokenStream<'src>,
    pub(super) pos: usize,
    pub(super) options: Options,
    pub(super) depth: u32,
    pub(super) debug_fuel: Cell<u32>,
    /// Inside a decorator: a top-level `@` starts the next decorator.
    pub(super) no_matmul: bool,
    recursion_limit: u32,
    claims: Claims,
    rules: Vec<Rule>,
}

impl<'src> Parser<'src> {
    pub fn new(stream: TokenStream<'src>, options: Options) -> Self {
        let claims = Claims::new(stream.raw_len());
        Self {
            stream,
            pos: 0,
            options,
            depth: 0,
            debug_fuel: Cell::new(256),
            no_matmul: false,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            claims,
            rules: Vec::with_capacity(16),
        }
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    fn reset_debug_fuel(&self) {
        self.debug_fuel.set(256);
    }

    pub(super) fn current(&self) -> SyntaxKind {
        self.ensure_progress();
        self.stream.kind(self.pos)
    }

    pub(super) fn nth(&self, lookahead: usize) -> SyntaxKind {
        self.ensure_progress();
        self.stream.kind(self.pos + lookahead)
    }

    pub(super) fn current_text(&self) -> &'src str {
        self.stream.text(self.pos)
    }

    pub(super) fn nth_text(&self, lookahead: usize) -> &'src str {
        self.stream.text(self.pos + lookahead)
    }

    pub(super) fn eof(&self) -> bool {
        self.current() == SyntaxKind::Eof
    }

    pub(super) fn currently_is(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn currently_is_one_of(&self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    /// Soft keyword check (`match`, `case`, `_`).
    pub(super) fn currently_is_name(&self, text: &str) -> bool {
        self.current() == SyntaxKind::Name && self.current_text() == text
    }

    pub(super) fn next_is(&self, kind: SyntaxKind) -> bool {
        self.nth(1) == kind
    }

    pub(super) fn bump(&mut self) -> &'src str {
        assert!(!self.eof(), "bump called at EOF");
        self.reset_debug_fuel();
        let text = self.current_text();
        self.pos += 1;
        text
    }

    pub(super) fn eat_token(&mut self, kind: SyntaxKind) -> bool {
        if self.currently_is(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, kind: SyntaxKind, what: &str) -> PResult<()> {
        if self.eat_token(kind) {
            return Ok(());
        }
        Err(self.error(format!("expected {}", what)))
    }

    pub(super) fn expect_name(&mut self, what: &str) -> PResult<String> {
        if self.currently_is(SyntaxKind::Name) {
            return Ok(self.bump().to_owned());
        }
        Err(self.error(format!("expected {}", what)))
    }

    /// A parse cancellation at the current token.
    pub(super) fn error(&self, message: impl Into<String>) -> Error {
        let token = self.stream.token(self.pos);
        let rule = self.rules.last().map(|rule| {
            (
                rule.name,
                self.stream.token(rule.start).span,
            )
        });
        Error::Parse(ParseError {
            message: message.into(),
            span: token.span,
            found: token.kind,
            found_text: self.current_text().to_owned(),
            rules: self.rules.iter().map(|r| r.name).collect(),
            rule: rule.map(|(name, _)| name),
            rule_span: rule.map(|(_, span)| span),
        })
    }

    pub(super) fn no_viable_alternative(&self) -> Error {
        self.error("no viable alternative")
    }

    /// Runs `f` as grammar rule `name` so errors report it as context.
    pub(super) fn rule<T>(
        &mut self,
        name: &'static str,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        self.rules.push(Rule {
            name,
            start: self.pos,
        });
        let result = f(self);
        self.rules.pop();
        result
    }

    /// Line break between the previous token and the cursor. Only
    /// significant when semicolons are optional.
    pub(super) fn at_line_break(&self) -> bool {
        !self.options.require_semicolons && self.stream.line_terminator_ahead(self.pos)
    }

    pub(super) fn raw_line_break(&self) -> bool {
        self.stream.line_terminator_ahead(self.pos)
    }

    pub(super) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            claims: self.claims.log.len(),
            no_matmul: self.no_matmul,
        }
    }

    pub(super) fn rewind(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.claims.rewind(checkpoint.claims);
        self.no_matmul = checkpoint.no_matmul;
        self.reset_debug_fuel();
    }

    /// Tries `f`; a parse failure rewinds and yields `None`. Fatal errors
    /// (recursion limit) propagate.
    pub(super) fn speculate<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<Option<T>> {
        let checkpoint = self.checkpoint();
        let depth = self.depth;
        let rules = self.rules.len();
        match f(self) {
            Ok(value) => Ok(Some(value)),
            Err(Error::Parse(_)) => {
                self.rewind(checkpoint);
                self.depth = depth;
                self.rules.truncate(rules);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub(super) fn enter_recursion(&mut self) -> PResult<()> {
        if self.depth >= self.recursion_limit {
            return Err(Error::RecursionLimitExceeded);
        }
        self.depth += 1;
        self.reset_debug_fuel();
        Ok(())
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.reset_debug_fuel();
    }

    /// Runs `f` one recursion level deeper.
    pub(super) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.enter_recursion()?;
        let result = f(self);
        self.exit_recursion();
        result
    }

    /// Runs `f` with `@` treated as matrix multiplication again (inside
    /// brackets and conditional tests of a decorator).
    pub(super) fn with_matmul<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let saved = std::mem::replace(&mut self.no_matmul, false);
        let result = f(self);
        self.no_matmul = saved;
        result
    }

    /// Raw index of the last consumed token.
    pub(super) fn last_raw(&self) -> usize {
        self.stream.raw_index(self.pos.saturating_sub(1))
    }

    pub(super) fn comment(&self, raw: usize) -> Comment {
        let kind = match self.stream.raw(raw).kind {
            SyntaxKind::BlockComment => CommentKind::Block,
            _ => CommentKind::Line,
        };
        Comment {
            kind,
            text: self.stream.raw_text(raw).to_owned(),
            column: self.stream.column(raw),
        }
    }

    /// Unclaimed comments on their own lines before the cursor.
    pub(super) fn take_preceding_comments(&mut self) -> Vec<Comment> {
        let raws = self.stream.preceding_comments(self.pos);
        let mut comments = Vec::with_capacity(raws.len());
        for raw in raws {
            if !self.claims.is_claimed(raw) {
                self.claims.claim(raw);
                comments.push(self.comment(raw));
            }
        }
        comments
    }

    /// Like [`Self::take_preceding_comments`], but stops at the first comment
    /// whose line is not indented deeper than `indent`.
    pub(super) fn take_comments_indented_past(&mut self, indent: usize) -> Vec<Comment> {
        let mut comments = Vec::new();
        for raw in self.stream.preceding_comments(self.pos) {
            if self.claims.is_claimed(raw) {
                continue;
            }
            if self.stream.line_indent(raw) <= indent {
                break;
            }
            self.claims.claim(raw);
            comments.push(self.comment(raw));
        }
        comments
    }

    /// Unclaimed same-line comments after the last consumed token, joined
    /// into one when there are several.
    pub(super) fn take_trailing_comment(&mut self) -> Option<Comment> {
        if self.pos == 0 {
            return None;
        }
        let raws = self.stream.trailing_comments(self.last_raw());
        let (&first, rest) = raws.split_first()?;
        if self.claims.is_claimed(first) {
            return None;
        }
        for &raw in &raws {
            self.claims.claim(raw);
        }
        let mut comment = self.comment(first);
        if !rest.is_empty() {
            comment = join_comments(comment, rest.iter().map(|&raw| self.comment(raw)));
        }
        Some(comment)
    }

    /// Indentation of the line holding the default token at `pos`.
    pub(super) fn line_indent_at(&self, pos: usize) -> usize {
        self.stream.line_indent(self.stream.raw_index(pos))
    }
}

/// Folds a run of same-line comments into one block comment, one body line
/// per comment.
fn join_comments(first: Comment, rest: impl Iterator<Item = Comment>) -> Comment {
    let column = first.column;
    let bodies: Vec<String> = std::iter::once(first)
        .chain(rest)
        .map(|comment| {
            let body = match comment.kind {
                CommentKind::Line => comment.text.strip_prefix('#').unwrap_or(&comment.text),
                CommentKind::Block => {
                    let text = comment.text.strip_prefix("#{").unwrap_or(&comment.text);
                    text.strip_suffix("#}").unwrap_or(text)
                }
            };
            body.trim().to_owned()
        })
        .collect();
    Comment {
        kind: CommentKind::Block,
        text: format!("#{{\n{}\n#}}", bodies.join("\n")),
        column,
    }
}
