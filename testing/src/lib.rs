//! # Platform Mocks Testing
//!
//! Testing utilities for the mock servers.
//!
//! This crate provides:
//! - Deterministic implementations of the Environment traits
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use platform_mocks_testing::{test_clock, SequentialIdGenerator, ReducerTest};
//!
//! ReducerTest::new(LoopReducer)
//!     .with_env(LoopEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIdGenerator::new())))
//!     .given_state(LoopState::seeded())
//!     .when_action(command)
//!     .then_replies(|replies| assert_eq!(replies.len(), 1))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use platform_mocks_core::environment::{Clock, IdGenerator};


pub use reducer_test::{resolve_replies, ReducerTest};

/// Deterministic implementations of the Environment traits.
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};
    use uuid::Uuid;

    /// Fixed clock for deterministic tests
    ///
    /// # Example
    ///
    /// ```
    /// use platform_mocks_testing::mocks::FixedClock;
    /// use platform_mocks_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Never in practice: the timestamp is a literal.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable identifiers: `00000000-0000-0000-0000-000000000001`, then `...02`, ...
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Start the sequence at 1
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(0),
            }
        }

        /// The id that the `n`-th call (1-based) returns
        #[must_use]
        pub const fn nth(n: u64) -> Uuid {
            Uuid::from_u64_pair(0, n)
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> Uuid {
            let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
            Self::nth(n)
        }
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock, SequentialIdGenerator};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIdGenerator::new();
        assert_eq!(ids.next_id(), SequentialIdGenerator::nth(1));
        assert_eq!(
            ids.next_id().to_string(),
            "00000000-0000-0000-0000-000000000002"
        );
    }
}
