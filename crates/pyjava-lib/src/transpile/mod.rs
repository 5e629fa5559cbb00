//! Tree-to-text code generation.
//!
//! # Architecture
//!
//! A single depth-first walk writes into a [`LazyBuffer`]. Nothing is
//! rendered until the walk has finished, so a failing unit never produces
//! partial output.
//!
//! - Statement framing: every statement first opens an insertion point (an
//!   empty segment spliced in front of its text) and closes it once its line
//!   is done
//! - Hoisting: lambdas and anonymous classes that have no inline Python form
//!   become `def __lambdaN` / `def __NameN` declarations written into the
//!   innermost open insertion point, then referenced by name
//! - Counters: lambda and class numbers are fields of the one transpiler, so
//!   numbering is global per file, in order of first occurrence
//!
//! The tree already reflects every grammar option; rendering never looks at
//! [`Options`](crate::Options).

mod comments;
mod expressions;
mod hoist;
mod invariants;
mod patterns;
mod statements;

#[cfg(test)]
mod tests;

use log::trace;
use pyjava_core::{LazyBuffer, SegmentId, SegmentWriter, TextSink};

use crate::{Result, stack};
use crate::ast::File;
use crate::options::Options;
use crate::parser;

/// Transpiles PyJava `source` to Python text.
pub fn transpile(source: &str, options: &Options) -> Result<String> {
    Ok(build(source, options)?.render_to_string()?)
}

/// Transpiles into any sink. The sink is only written to once the whole
/// input has been parsed and rendered into the buffer.
pub fn transpile_to(source: &str, options: &Options, sink: &mut impl TextSink) -> Result<()> {
    build(source, options)?.render(sink)?;
    Ok(())
}

/// Parses and walks the tree on one deep-stack thread. The tree is dropped
/// there too; only the flat buffer comes back.
fn build(source: &str, options: &Options) -> Result<LazyBuffer> {
    let limit = parser::DEFAULT_RECURSION_LIMIT;
    stack::run(limit, || {
        let file = parser::parse_on_current_stack(source, options, limit)?;
        Ok(render(&file))
    })
}

/// Builds the output program for a parsed file.
pub fn render(file: &File) -> LazyBuffer {
    let mut transpiler = Transpiler::new();
    transpiler.file(file);
    transpiler.finish()
}

pub(crate) struct Transpiler {
    buffer: LazyBuffer,
    /// Segment the walk currently writes to.
    out: SegmentId,
    /// Insertion points of the open statements, innermost last.
    insertion_points: Vec<SegmentId>,
    lambda_count: u32,
    class_count: u32,
}

impl Transpiler {
    pub(crate) fn new() -> Self {
        let buffer = LazyBuffer::new();
        let out = buffer.root();
        Self {
            buffer,
            out,
            insertion_points: Vec::new(),
            lambda_count: 0,
            class_count: 0,
        }
    }

    pub(crate) fn finish(self) -> LazyBuffer {
        self.assert_balanced();
        self.buffer
    }

    /// Writer for the current segment.
    #[inline]
    fn w(&mut self) -> SegmentWriter<'_> {
        self.buffer.at(self.out)
    }

    fn open_statement(&mut self) {
        let point = self.w().later();
        trace!("statement opened at {:?}", point);
        self.insertion_points.push(point);
    }

    fn close_statement(&mut self) {
        self.insertion_points.pop();
    }

    /// Runs `render` against the insertion point of the innermost statement,
    /// as if it were a fresh top-level walk at that position.
    fn hoist(&mut self, render: impl FnOnce(&mut Self)) {
        let target = self.insertion_point();
        let out = std::mem::replace(&mut self.out, target);
        let outer = std::mem::take(&mut self.insertion_points);
        render(self);
        self.insertion_points = outer;
        self.out = out;
    }

    fn lambda_name(&mut self) -> String {
        let name = format!("__lambda{}", self.lambda_count);
        self.lambda_count += 1;
        name
    }

    fn class_name(&mut self, hint: &str) -> String {
        let name = format!("__{}{}", hint, self.class_count);
        self.class_count += 1;
        name
    }
}
