//! Numeric suffixes for generated class names

use std::cell::Cell;

/// A monotonically increasing counter handing out class name suffixes.
///
/// One allocator is shared by every registry of a [`StyleContext`](crate::StyleContext), which is
/// what keeps names from independently created registries apart. Values are never handed out
/// twice, not even across [`StyleContext::reset_all`](crate::StyleContext::reset_all).
///
/// This is a `Cell`, the allocator is single threaded.
#[derive(Debug, Default)]
pub struct IdAllocator {
    /// The next id to hand out
    next: Cell<u64>,
}

impl IdAllocator {
    /// A allocator starting at 0
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A allocator starting at `seed`, for reproducible names in tests
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            next: Cell::new(seed),
        }
    }

    /// Take the next id
    pub fn next_id(&self) -> u64 {
        let id = self.next.get();
        let Some(next) = id.checked_add(1) else {
            crate::error_handling::cold_path();
            log::error!("Class name id space exhausted, ids will repeat");
            return id;
        };
        self.next.set(next);
        id
    }

    /// Look at the next id without taking it
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.next.get()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn starts_at_zero() {
        let allocator = IdAllocator::new();
        assert_eq!(allocator.next_id(), 0);
        assert_eq!(allocator.next_id(), 1);
        assert_eq!(allocator.peek(), 2);
    }

    #[test]
    fn seeded() {
        let allocator = IdAllocator::with_seed(41);
        assert_eq!(allocator.next_id(), 41);
        assert_eq!(allocator.next_id(), 42);
    }

    proptest! {
        #[test]
        fn strictly_increasing(seed in 0..u64::MAX / 2, count in 1usize..200) {
            let allocator = IdAllocator::with_seed(seed);
            let ids: Vec<u64> = (0..count).map(|_| allocator.next_id()).collect();
            prop_assert!(ids.windows(2).all(|pair| matches!(pair, [a, b] if a < b)));
        }
    }
}
