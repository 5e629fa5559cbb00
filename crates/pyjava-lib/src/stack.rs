//! Dedicated thread for the recursive passes.
//!
//! Parsing, rendering and dropping a tree all recurse once per nesting
//! level, and a level can take tens of kilobytes of stack in a debug build.
//! The recursion limit alone would still overflow a caller's 2 MiB thread,
//! so the passes run on a thread sized for the limit in force.

use std::thread;

use crate::{Error, Result};

/// Stack reserved per recursion level.
const STACK_PER_LEVEL: usize = 128 * 1024;

/// Stack for the frames outside the nesting itself.
const BASE_STACK: usize = 2 * 1024 * 1024;

/// Stack size covering `limit` nested levels.
pub(crate) fn stack_size(limit: u32) -> usize {
    (limit as usize)
        .saturating_mul(STACK_PER_LEVEL)
        .saturating_add(BASE_STACK)
}

/// Runs `f` on a scoped thread whose stack covers `limit` levels. A panic in
/// `f` is resumed on the calling thread.
pub(crate) fn run<T: Send>(limit: u32, f: impl FnOnce() -> Result<T> + Send) -> Result<T> {
    thread::scope(|scope| {
        let handle = thread::Builder::new()
            .name("pyjava-parse".to_owned())
            .stack_size(stack_size(limit))
            .spawn_scoped(scope, f)
            .map_err(Error::Thread)?;
        match handle.join() {
            Ok(result) => result,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    })
}
