//! # Platform Mocks Runtime
//!
//! The [`Store`] owns a mock server's dataset, runs its reducer and executes
//! the effects the reducer returns.
//!
//! Request handlers talk to the store through [`Store::send_and_wait_for`]:
//! the handler registers interest in a reply, sends its command, and receives
//! the first action produced by an effect that matches. Every waiting request
//! owns its own reply slot, so a reply is never lost however many requests
//! are in flight.
//!
//! ## Example
//!
//! ```ignore
//! use platform_mocks_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! let reply = store
//!     .send_and_wait_for(command, move |a| is_reply_to(a, request_id), timeout)
//!     .await?;
//!
//! let value = store.state(|s| s.some_field).await;
//! ```

use platform_mocks_core::{effect::Effect, reducer::Reducer};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{oneshot, RwLock};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// No matching action arrived before the timeout
        #[error("Timeout waiting for action")]
        Timeout,

        /// The reply slot was dropped before a matching action arrived
        #[error("Reply channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Health check status levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Accepting commands
    Healthy,

    /// Shutting down
    Unhealthy,
}

/// Health check result for a component
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    /// Name of the component being checked
    pub component: String,

    /// Current health status
    pub status: HealthStatus,

    /// Optional message providing details
    pub message: Option<String>,

    /// Counters such as running effects and waiting requests
    pub metadata: Vec<(String, String)>,
}

impl HealthCheck {
    fn new(component: &str, status: HealthStatus, message: Option<String>) -> Self {
        Self {
            component: component.to_string(),
            status,
            message,
            metadata: Vec::new(),
        }
    }

    #[must_use]
    fn with_metadata(mut self, key: &str, value: impl ToString) -> Self {
        self.metadata.push((key.to_string(), value.to_string()));
        self
    }
}

type Matcher<A> = Box<dyn Fn(&A) -> bool + Send + Sync>;

/// A request waiting for an action produced by an effect.
struct Waiter<A> {
    id: u64,
    matches: Matcher<A>,
    sender: oneshot::Sender<A>,
}

/// Requests waiting for their reply, each with its own oneshot channel.
struct Waiters<A> {
    next_id: AtomicU64,
    pending: Mutex<Vec<Waiter<A>>>,
}

impl<A: Clone> Waiters<A> {
    fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            pending: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Waiter<A>>> {
        // A panicking matcher leaves the list itself consistent
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn register_interest(&self, matches: Matcher<A>) -> (u64, oneshot::Receiver<A>) {
        let (sender, receiver) = oneshot::channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        self.lock().push(Waiter {
            id,
            matches,
            sender,
        });

        (id, receiver)
    }

    fn cancel(&self, id: u64) {
        self.lock().retain(|waiter| waiter.id != id);
    }

    /// Hand `action` to the first waiter it matches, returning whether one did.
    fn notify(&self, action: &A) -> bool {
        let waiter = {
            let mut pending = self.lock();
            let idx = pending.iter().position(|waiter| (waiter.matches)(action));
            idx.map(|idx| pending.swap_remove(idx))
        };

        match waiter {
            Some(waiter) => {
                if waiter.sender.send(action.clone()).is_err() {
                    tracing::debug!(waiter = waiter.id, "Waiter gave up before its reply");
                }
                true
            },
            None => false,
        }
    }

    fn pending_count(&self) -> usize {
        self.lock().len()
    }
}

/// Decrements the running-effect counter when an effect task ends, even by panic.
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicUsize, Duration, Effect, HealthCheck, HealthStatus, Ordering,
        PendingGuard, Reducer, RwLock, StoreError, Waiters,
    };

    /// Runtime coordinator for a reducer.
    ///
    /// The reducer always runs under the write half of one `RwLock`, so
    /// mutations of the dataset are serialized. Reads through
    /// [`Store::state`] share the read half and never observe a half-applied
    /// command.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        waiters: Arc<Waiters<A>>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                waiters: Arc::new(Waiters::new()),
            }
        }

        /// Unhealthy once shutdown has started, healthy otherwise.
        #[must_use]
        pub fn health(&self) -> HealthCheck {
            let check = if self.shutdown.load(Ordering::Acquire) {
                HealthCheck::new(
                    "store",
                    HealthStatus::Unhealthy,
                    Some("Store is shutting down".to_string()),
                )
            } else {
                HealthCheck::new("store", HealthStatus::Healthy, None)
            };

            check
                .with_metadata("pending_effects", self.pending_effects.load(Ordering::Acquire))
                .with_metadata("waiting_requests", self.waiters.pending_count())
        }

        /// Stop accepting actions and wait for running effects to finish.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if effects are still
        /// running when `timeout` expires.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(pending_effects = pending, "Shutdown timeout");
                    metrics::counter!("store.shutdown.timeout").increment(1);
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        }

        /// Run the reducer for `action` and start its effects.
        ///
        /// Returns once the effects are spawned, not when they complete.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("store.commands.total").increment(1);

            let effects = {
                let mut state = self.state.write().await;

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!(effects = effects.len(), "Reducer completed");
                effects
            };

            for effect in effects {
                self.execute_effect(effect);
            }

            Ok(())
        }

        /// Send `action` and wait for the first effect-produced action
        /// matching `predicate`.
        ///
        /// Only actions produced by effects are matched, never `action`
        /// itself, so concurrent requests must carry a request id the
        /// predicate checks.
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`]: the store is shutting down
        /// - [`StoreError::Timeout`]: no matching action within `timeout`
        /// - [`StoreError::ChannelClosed`]: the store dropped the reply slot
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            F: Fn(&A) -> bool + Send + Sync + 'static,
        {
            // Registered before sending so the reply cannot slip past
            let (waiter, reply) = self.waiters.register_interest(Box::new(predicate));

            if let Err(err) = self.send(action).await {
                self.waiters.cancel(waiter);
                return Err(err);
            }

            match tokio::time::timeout(timeout, reply).await {
                Ok(Ok(action)) => Ok(action),
                Ok(Err(_)) => Err(StoreError::ChannelClosed),
                Err(_) => {
                    self.waiters.cancel(waiter);
                    tracing::warn!(?timeout, "No reply before timeout");
                    Err(StoreError::Timeout)
                },
            }
        }

        /// Read current state through a closure, releasing the lock on return.
        ///
        /// ```ignore
        /// let vendor_count = store.state(|s| s.vendors.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        fn execute_effect(&self, effect: Effect<A>) {
            match effect {
                Effect::None => {
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Future(fut) => {
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);

                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let guard = PendingGuard(Arc::clone(&self.pending_effects));
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = guard;

                        let Some(action) = fut.await else {
                            return;
                        };

                        // Feed back first so the waiter observes the resulting state
                        if let Err(err) = store.send(action.clone()).await {
                            tracing::debug!(error = %err, "Effect action not fed back");
                        }
                        if !store.waiters.notify(&action) {
                            tracing::trace!("No request waiting for effect action");
                        }
                    });
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                waiters: Arc::clone(&self.waiters),
            }
        }
    }
}

pub use store::Store;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use platform_mocks_core::{smallvec, SmallVec};

    #[derive(Debug, Clone)]
    struct TestState {
        value: i32,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Increment,
        Decrement,
        ProduceEffect,
        Produced,
        ProducePanickingEffect,
        Sleep,
    }

    #[derive(Debug, Clone)]
    struct TestEnv;

    #[derive(Debug, Clone)]
    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.value += 1;
                    smallvec![Effect::None]
                },
                TestAction::Decrement => {
                    state.value -= 1;
                    smallvec![Effect::None]
                },
                TestAction::ProduceEffect => smallvec![Effect::reply(TestAction::Produced)],
                TestAction::Produced => {
                    state.value += 10;
                    SmallVec::new()
                },
                TestAction::ProducePanickingEffect => smallvec![Effect::Future(Box::pin(async {
                    panic!("Intentional panic in effect for testing");
                }))],
                TestAction::Sleep => smallvec![Effect::Future(Box::pin(async {
                    tokio::time::sleep(Duration::from_millis(300)).await;
                    None
                }))],
            }
        }
    }

    fn store() -> Store<TestState, TestAction, TestEnv, TestReducer> {
        Store::new(TestState { value: 0 }, TestReducer, TestEnv)
    }

    fn metadata(check: &HealthCheck, key: &str) -> String {
        check
            .metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .expect("metadata key present")
    }

    #[tokio::test]
    async fn test_sends_apply_in_order() {
        let store = store();

        store.send(TestAction::Increment).await.unwrap();
        store.send(TestAction::Increment).await.unwrap();
        store.send(TestAction::Decrement).await.unwrap();

        assert_eq!(store.state(|s| s.value).await, 1);
    }

    #[tokio::test]
    async fn test_reply_is_fed_back_before_waiter_wakes() {
        let store = store();

        let reply = store
            .send_and_wait_for(
                TestAction::ProduceEffect,
                |a| *a == TestAction::Produced,
                Duration::from_secs(1),
            )
            .await
            .unwrap();

        assert_eq!(reply, TestAction::Produced);
        assert_eq!(store.state(|s| s.value).await, 10);
    }

    #[tokio::test]
    async fn test_concurrent_sends_are_serialized() {
        let store = store();

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.send(TestAction::Increment).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.state(|s| s.value).await, 10);
    }

    #[tokio::test]
    async fn test_effect_panic_isolation() {
        let store = store();

        store.send(TestAction::ProducePanickingEffect).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        store.send(TestAction::Increment).await.unwrap();
        assert_eq!(store.state(|s| s.value).await, 1);
        assert_eq!(metadata(&store.health(), "pending_effects"), "0");
    }

    #[tokio::test]
    async fn test_timed_out_waiter_is_released() {
        let store = store();

        let result = store
            .send_and_wait_for(
                TestAction::Increment,
                |a| *a == TestAction::Produced,
                Duration::from_millis(20),
            )
            .await;

        assert!(matches!(result, Err(StoreError::Timeout)));
        assert_eq!(metadata(&store.health(), "waiting_requests"), "0");
    }

    mod shutdown_tests {
        use super::*;

        #[tokio::test]
        async fn test_shutdown_with_no_pending_effects() {
            let store = store();
            assert_eq!(store.health().status, HealthStatus::Healthy);

            store.shutdown(Duration::from_secs(1)).await.unwrap();

            let check = store.health();
            assert_eq!(check.status, HealthStatus::Unhealthy);
            assert_eq!(check.message.as_deref(), Some("Store is shutting down"));
        }

        #[tokio::test]
        async fn test_shutdown_rejects_new_actions() {
            let store = store();
            store.shutdown(Duration::from_secs(1)).await.unwrap();

            let result = store
                .send_and_wait_for(
                    TestAction::ProduceEffect,
                    |_| true,
                    Duration::from_secs(1),
                )
                .await;

            assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
            assert_eq!(metadata(&store.health(), "waiting_requests"), "0");
        }

        #[tokio::test]
        async fn test_shutdown_timeout() {
            let store = store();
            store.send(TestAction::Sleep).await.unwrap();

            let result = store.shutdown(Duration::from_millis(50)).await;
            assert!(
                matches!(result, Err(StoreError::ShutdownTimeout(pending)) if pending > 0),
                "Expected ShutdownTimeout, got: {result:?}"
            );
        }
    }
}
