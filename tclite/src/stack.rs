//! Native stack headroom for nested evaluation.
//!
//! Each nested script (a command substitution or a procedure body) costs several native
//! stack frames.  The interpreter enters every nested evaluation through
//! [`ensure_sufficient_stack`], which moves onto a freshly allocated stack segment when
//! the current one runs low, so the recursion limit is reached long before the thread's
//! own stack is exhausted, however small that stack is.

// If less than this remains, switch to a new segment.
const RED_ZONE: usize = 128 * 1024;

// Size of each new segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Runs `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// On WASM the runtime manages the stack; just run `f`.
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
