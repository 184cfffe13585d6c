// File: src/stack.rs
//
// Stack growth for the recursive parts of hlang.
//
// Parsing nested blocks and expressions and evaluating user recursion both
// recurse on the Rust stack. Each recursive entry point goes through
// `ensure_sufficient_stack`, which moves onto a freshly allocated segment when
// the current one runs low, so deep `firseKaro` recursion runs instead of
// aborting the process.

/// Grow when less than this much stack is left.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first switching to a new stack segment if the remaining stack is
/// below the red zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
