//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::buffer::{LazyBuffer, SegmentId};

impl LazyBuffer {
    #[inline]
    pub(crate) fn ensure_segment(&self, segment: SegmentId) {
        assert!(
            segment.index() < self.segment_count(),
            "LazyBuffer: {:?} was not allocated by this buffer (caller mixed up buffers)",
            segment
        );
    }
}
