//! Stack growth for recursive descent.
//!
//! Matching functions recurse once per production level, and both the
//! grammar validator and the tree printer recurse once per node. Deeply
//! nested input (long right-recursive sequences in particular) can exceed
//! the default thread stack, so every such recursion goes through
//! [`ensure_sufficient_stack`].
//!
//! On native targets the stack grows by 1MB whenever less than 100KB remains.
//! On `wasm32` the closure is called directly.

const RED_ZONE: usize = 100 * 1024;

const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if the red zone has been reached.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
