//! # Platform Mocks Core
//!
//! Core traits and types shared by the mock servers.
//!
//! Every mock is a small reducer-driven application: the dataset lives in a
//! single `State` value, every mutating request becomes an `Action`, and the
//! `Reducer` applies the lifecycle transition and describes the reply as an
//! `Effect`. The runtime crate executes those effects and feeds the produced
//! actions back to waiting request handlers.
//!
//! ## Core Concepts
//!
//! - **State**: The in-memory dataset of one mock server
//! - **Action**: All possible inputs to a reducer (commands and their completions)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies (clock, id generation) via traits
//!
//! ## Example
//!
//! ```ignore
//! use platform_mocks_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! impl Reducer for CatalogReducer {
//!     type State = CatalogState;
//!     type Action = CatalogAction;
//!     type Environment = CatalogEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CatalogState,
//!         action: CatalogAction,
//!         env: &CatalogEnvironment,
//!     ) -> SmallVec<[Effect<CatalogAction>; 4]> {
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for LoopReducer {
    ///     type State = LoopState;
    ///     type Action = LoopAction;
    ///     type Environment = LoopEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut LoopState,
    ///         action: LoopAction,
    ///         env: &LoopEnvironment,
    ///     ) -> SmallVec<[Effect<LoopAction>; 4]> {
    ///         match action {
    ///             LoopAction::Command { .. } => smallvec![Effect::None],
    ///             _ => SmallVec::new(),
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Returns
        ///
        /// The effects to be executed by the runtime. Most reducers return
        /// zero or one effect, so the inline capacity avoids allocation.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values, not execution.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Async computation whose action, if any, is fed back into the
        /// reducer and then offered to waiting requests
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action>
    where
        Action: Send + 'static,
    {
        /// Wrap an already computed action so the runtime feeds it back
        ///
        /// This is how a reducer answers a request: the reply travels through
        /// the same feedback path as any asynchronous result.
        #[must_use]
        pub fn reply(action: Action) -> Effect<Action> {
            Effect::Future(Box::pin(async move { Some(action) }))
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All non-deterministic inputs (time and identifiers) are abstracted behind
/// traits and injected via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - uses system clock
    /// let clock = SystemClock;
    ///
    /// // Test - fixed time for deterministic tests
    /// let clock = FixedClock::new(test_time);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Identifier source for newly created records
    pub trait IdGenerator: Send + Sync {
        /// Produce a fresh identifier
        fn next_id(&self) -> Uuid;
    }

    /// Production generator producing random (v4) UUIDs
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidGenerator;

    impl IdGenerator for UuidGenerator {
        fn next_id(&self) -> Uuid {
            Uuid::new_v4()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::effect::Effect;
    use super::environment::{Clock, IdGenerator, SystemClock, UuidGenerator};

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn uuid_generator_produces_distinct_ids() {
        let ids = UuidGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }

    #[tokio::test]
    async fn reply_effect_yields_its_action() {
        let effect = Effect::reply(42_u32);
        match effect {
            Effect::Future(fut) => assert_eq!(fut.await, Some(42)),
            other => panic!("expected Effect::Future, got {other:?}"),
        }
    }
}
