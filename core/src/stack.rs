//! Stack growth for deep recursion.
//!
//! Evaluation, binding and rendering all recurse over the expression tree.
//! Wrapping each level in [`ensure_sufficient_stack`] moves the recursion
//! onto a fresh heap-allocated segment whenever the current stack runs low,
//! so the depth a thread can handle no longer depends on its stack size.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_recursion_on_small_thread() {
        fn deep(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { deep(n - 1) + 1 })
        }

        let handle = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(|| deep(100_000))
            .unwrap();
        assert_eq!(handle.join().unwrap(), 100_000);
    }
}
