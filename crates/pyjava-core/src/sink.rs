//! Text sinks.
//!
//! The buffer only needs three primitives; anything that can take characters and
//! string slices can receive rendered output.

use std::io;

pub trait TextSink {
    fn append_char(&mut self, c: char) -> io::Result<()>;

    fn append_str(&mut self, s: &str) -> io::Result<()>;

    /// Appends `s[start..end]`. Bounds are byte offsets on char boundaries.
    fn append_range(&mut self, s: &str, start: usize, end: usize) -> io::Result<()> {
        self.append_str(&s[start..end])
    }
}

impl TextSink for String {
    #[inline]
    fn append_char(&mut self, c: char) -> io::Result<()> {
        self.push(c);
        Ok(())
    }

    #[inline]
    fn append_str(&mut self, s: &str) -> io::Result<()> {
        self.push_str(s);
        Ok(())
    }
}

/// Adapts any [`io::Write`] (file, stdout, socket) into a sink.
pub struct WriteSink<W: io::Write> {
    inner: W,
}

impl<W: io::Write> WriteSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> TextSink for WriteSink<W> {
    fn append_char(&mut self, c: char) -> io::Result<()> {
        let mut utf8 = [0u8; 4];
        self.inner.write_all(c.encode_utf8(&mut utf8).as_bytes())
    }

    fn append_str(&mut self, s: &str) -> io::Result<()> {
        self.inner.write_all(s.as_bytes())
    }
}
