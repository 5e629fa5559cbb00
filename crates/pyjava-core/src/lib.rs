#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Output-side building blocks for the PyJava transpiler.
//!
//! - [`LazyBuffer`]: an arena of operation segments rendered once at the end,
//!   with insertion points that can still be written after later text was appended
//! - [`TextSink`]: where rendered text goes (a `String`, a file, stdout)

mod buffer;
mod invariants;
mod sink;

#[cfg(test)]
mod buffer_tests;
#[cfg(test)]
mod sink_tests;

pub use buffer::{AppenderState, LazyBuffer, SegmentId, SegmentWriter};
pub use sink::{TextSink, WriteSink};

/// Errors raised while rendering a buffer.
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    /// A dedent would take the indentation below zero.
    #[error("cannot decrease indent, already at 0")]
    NegativeIndent,

    #[error("failed to write output: {0}")]
    Sink(#[from] std::io::Error),
}
