//! Parser for PyJava source.
//!
//! # Architecture
//!
//! Lexing and parsing are separate passes. The lexer (Logos) produces
//! span-only tokens on two channels; the parser is a hand-written recursive
//! descent over the default channel that builds the owned syntax tree in
//! [`crate::ast`] directly.
//!
//! - Zero-copy lexing: tokens carry spans, text is sliced only when a tree
//!   node needs it
//! - Hidden-channel queries: line breaks and comments are looked up around
//!   the cursor instead of being fed to the grammar
//! - Bracket pairing: a table of matching brackets lets headers and
//!   conditional expressions look past a group without parsing it
//! - Claimed comments: every comment is handed to at most one tree node
//!
//! # Failure
//!
//! There is no recovery. The first violated rule cancels the parse with a
//! [`ParseError`] naming the expected construct, the offending token and the
//! enclosing rule. Exceeding the recursion limit is reported separately as
//! [`crate::Error::RecursionLimitExceeded`]. Parsing runs on a thread sized
//! for the limit, so the limit is reached before the stack runs out.

pub mod cst;
pub mod lexer;
pub mod stream;

mod brackets;
mod core;
mod error;
mod grammar;
mod invariants;

#[cfg(test)]
mod brackets_tests;
#[cfg(test)]
mod stream_tests;
#[cfg(test)]
mod tests;

pub use brackets::{Bracket, BracketStack};
pub use core::{DEFAULT_RECURSION_LIMIT, Parser};
pub use cst::{SyntaxKind, TokenSet};
pub use error::ParseError;
pub use lexer::{Token, lex};
pub use stream::TokenStream;

use crate::Result;
use crate::ast::File;
use crate::options::Options;

/// Main entry point: lexes and parses `source` under `options`.
pub fn parse(source: &str, options: &Options) -> Result<File> {
    parse_with_recursion_limit(source, options, DEFAULT_RECURSION_LIMIT)
}

/// Parses with a custom nesting limit, on a thread whose stack covers it.
pub fn parse_with_recursion_limit(source: &str, options: &Options, limit: u32) -> Result<File> {
    crate::stack::run(limit, || parse_on_current_stack(source, options, limit))
}

/// Parses on the calling thread, which must have room for `limit` levels.
pub(crate) fn parse_on_current_stack(
    source: &str,
    options: &Options,
    limit: u32,
) -> Result<File> {
    let tokens = lex(source)?;
    log::trace!("lexed {} tokens", tokens.len());
    let stream = TokenStream::new(source, tokens);
    Parser::new(stream, *options)
        .with_recursion_limit(limit)
        .parse_file()
}
