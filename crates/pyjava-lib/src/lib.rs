//! PyJava: a brace-delimited, optional-semicolon dialect of Python.
//!
//! Source is lexed, parsed into an owned syntax tree and rendered back as
//! canonical, indentation-based Python.
//!
//! # Example
//!
//! ```
//! use pyjava_lib::{Options, transpile};
//!
//! let source = "if (x < 10) print(x);\n";
//! let python = transpile(source, &Options::default()).expect("valid input");
//! assert_eq!(python, "if (x < 10):\n    print(x)\n");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod ast;
pub mod diagnostics;
pub mod options;
pub mod parser;
pub mod primary;
pub mod transpile;

mod stack;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter};
pub use options::Options;
pub use parser::{ParseError, lex, parse};
pub use transpile::{transpile, transpile_to};

use pyjava_core::BufferError;
use rowan::TextRange;

/// Errors that cancel the processing of one input unit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source contains text no token matches.
    #[error("{message}")]
    Lex { message: String, span: TextRange },

    /// The first grammar rule or predicate that failed.
    #[error("{0}")]
    Parse(ParseError),

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error(transparent)]
    Render(#[from] BufferError),

    /// The thread running the recursive passes could not be started.
    #[error("cannot start the parser thread: {0}")]
    Thread(#[source] std::io::Error),
}

impl Error {
    /// Position in the source, when the error has one.
    pub fn span(&self) -> Option<TextRange> {
        match self {
            Error::Lex { span, .. } => Some(*span),
            Error::Parse(err) => Some(err.span),
            Error::RecursionLimitExceeded | Error::Render(_) | Error::Thread(_) => None,
        }
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::from(self)
    }

    /// Renders the error against its source as an annotated snippet.
    pub fn render(&self, source: &str, path: &str, colored: bool) -> String {
        self.diagnostics()
            .printer()
            .source(source)
            .path(path)
            .colored(colored)
            .render()
    }
}

/// Result type for lexing, parsing and transpiling.
pub type Result<T> = std::result::Result<T, Error>;
