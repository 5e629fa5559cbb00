//! Lazy text buffer.
//!
//! Text is not written out as it is produced. Instead every append records an
//! operation in a segment; segments live in an arena and are addressed by
//! [`SegmentId`]. A segment may embed another segment at its current end
//! ([`SegmentWriter::later`]); writes to the embedded segment still render at
//! that position, which is how declarations discovered deep inside an
//! expression end up above the statement that contains it.
//!
//! Indentation is symbolic until [`LazyBuffer::render`] walks the operations
//! with a single [`AppenderState`].

use log::trace;

use crate::sink::TextSink;
use crate::BufferError;

/// Handle to a segment of a [`LazyBuffer`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SegmentId(u32);

impl SegmentId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Text ops reference byte ranges of the shared text pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    Text { start: usize, end: usize },
    Newline,
    Incr(u32),
    Decr(u32),
    Segment(SegmentId),
}

/// Render-time state threaded through every segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppenderState {
    pub indent: u32,
}

const INDENT: &str = "    ";

#[derive(Debug, Clone)]
pub struct LazyBuffer {
    text: String,
    segments: Vec<Vec<Op>>,
}

impl Default for LazyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LazyBuffer {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            segments: vec![Vec::new()],
        }
    }

    /// The top-level segment; rendering starts here.
    #[inline]
    pub fn root(&self) -> SegmentId {
        SegmentId(0)
    }

    /// Writer appending to the end of `segment`.
    pub fn at(&mut self, segment: SegmentId) -> SegmentWriter<'_> {
        self.ensure_segment(segment);
        SegmentWriter {
            buffer: self,
            segment,
        }
    }

    pub fn is_empty(&self, segment: SegmentId) -> bool {
        self.segments
            .get(segment.index())
            .is_none_or(|ops| ops.is_empty())
    }

    pub fn render(&self, sink: &mut impl TextSink) -> Result<(), BufferError> {
        let mut state = AppenderState::default();
        self.render_with(&mut state, sink)
    }

    /// Renders from the root with caller-owned state.
    ///
    /// The state is borrowed exclusively for the whole pass, so concurrent
    /// renders into one state cannot interleave their newline/indent output.
    pub fn render_with(
        &self,
        state: &mut AppenderState,
        sink: &mut impl TextSink,
    ) -> Result<(), BufferError> {
        self.render_segment(self.root(), state, sink)
    }

    pub fn render_to_string(&self) -> Result<String, BufferError> {
        let mut out = String::with_capacity(self.text.len() + self.text.len() / 4);
        self.render(&mut out)?;
        Ok(out)
    }

    fn render_segment(
        &self,
        segment: SegmentId,
        state: &mut AppenderState,
        sink: &mut impl TextSink,
    ) -> Result<(), BufferError> {
        for op in &self.segments[segment.index()] {
            match *op {
                Op::Text { start, end } => sink.append_range(&self.text, start, end)?,
                Op::Newline => {
                    sink.append_char('\n')?;
                    for _ in 0..state.indent {
                        sink.append_str(INDENT)?;
                    }
                }
                Op::Incr(n) => state.indent += n,
                Op::Decr(n) => {
                    state.indent = state
                        .indent
                        .checked_sub(n)
                        .ok_or(BufferError::NegativeIndent)?;
                }
                Op::Segment(child) => self.render_segment(child, state, sink)?,
            }
        }
        Ok(())
    }

    pub(crate) fn segment_count(&self) -> usize {
        self.segments.len()
    }

    fn ops_mut(&mut self, segment: SegmentId) -> &mut Vec<Op> {
        &mut self.segments[segment.index()]
    }

    #[cfg(test)]
    pub(crate) fn ops(&self, segment: SegmentId) -> &[Op] {
        &self.segments[segment.index()]
    }
}

/// Appends operations to one segment. All methods chain.
pub struct SegmentWriter<'b> {
    buffer: &'b mut LazyBuffer,
    segment: SegmentId,
}

impl SegmentWriter<'_> {
    pub fn segment(&self) -> SegmentId {
        self.segment
    }

    pub fn append(&mut self, s: &str) -> &mut Self {
        if s.is_empty() {
            return self;
        }
        let start = self.buffer.text.len();
        self.buffer.text.push_str(s);
        let end = self.buffer.text.len();

        let ops = self.buffer.ops_mut(self.segment);
        if let Some(Op::Text { end: last_end, .. }) = ops.last_mut()
            && *last_end == start
        {
            *last_end = end;
            return self;
        }
        ops.push(Op::Text { start, end });
        self
    }

    pub fn append_char(&mut self, c: char) -> &mut Self {
        let mut utf8 = [0u8; 4];
        self.append(c.encode_utf8(&mut utf8))
    }

    pub fn newline(&mut self) -> &mut Self {
        self.buffer.ops_mut(self.segment).push(Op::Newline);
        self
    }

    /// Increase indentation for lines started after this point.
    pub fn incr_indent(&mut self) -> &mut Self {
        shift_indent(self.buffer.ops_mut(self.segment), 1);
        self
    }

    pub fn decr_indent(&mut self) -> &mut Self {
        shift_indent(self.buffer.ops_mut(self.segment), -1);
        self
    }

    /// Dedent so that the next line starts one level shallower.
    ///
    /// When the last operation already is a newline, the dedent is moved in
    /// front of it instead of emitting a second (blank) line.
    pub fn decr_indent_newline(&mut self) -> &mut Self {
        let ops = self.buffer.ops_mut(self.segment);
        if ops.last() == Some(&Op::Newline) {
            ops.pop();
            self.decr_indent();
            return self.newline();
        }
        self.decr_indent().newline()
    }

    /// Splices a new empty segment at the current position and returns it.
    pub fn later(&mut self) -> SegmentId {
        let id = SegmentId(self.buffer.segments.len() as u32);
        self.buffer.segments.push(Vec::new());
        self.buffer.ops_mut(self.segment).push(Op::Segment(id));
        trace!("insertion point {:?} opened in {:?}", id, self.segment);
        id
    }
}

/// Folds an indent change into a directly preceding indent op.
///
/// Complementary neighbours cancel, so no `Incr` is ever followed by a `Decr`
/// (or the reverse) inside one segment.
fn shift_indent(ops: &mut Vec<Op>, delta: i64) {
    let merged = match ops.last() {
        Some(Op::Incr(n)) => i64::from(*n) + delta,
        Some(Op::Decr(n)) => delta - i64::from(*n),
        _ => {
            ops.push(indent_op(delta));
            return;
        }
    };
    ops.pop();
    if merged != 0 {
        ops.push(indent_op(merged));
    }
}

fn indent_op(delta: i64) -> Op {
    if delta > 0 {
        Op::Incr(delta as u32)
    } else {
        Op::Decr(delta.unsigned_abs() as u32)
    }
}
