//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use pyjava_core::SegmentId;

use super::Transpiler;

impl Transpiler {
    /// Insertion point of the innermost open statement.
    #[inline]
    pub(super) fn insertion_point(&self) -> SegmentId {
        match self.insertion_points.last() {
            Some(&point) => point,
            None => panic!(
                "broken transpiler invariant: expression rendered outside of any statement"
            ),
        }
    }

    pub(super) fn assert_balanced(&self) {
        assert!(
            self.insertion_points.is_empty(),
            "broken transpiler invariant: {} statement(s) left open",
            self.insertion_points.len()
        );
        assert_eq!(
            self.out,
            self.buffer.root(),
            "broken transpiler invariant: walk ended inside a hoisted declaration"
        );
    }

    #[cold]
    pub(super) fn compound_as_simple() -> ! {
        unreachable!("broken transpiler invariant: compound statement rendered as a simple one")
    }
}
