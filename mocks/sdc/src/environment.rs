//! Injected dependencies of the catalog reducer.

use platform_mocks_core::environment::{Clock, IdGenerator, SystemClock, UuidGenerator};
use std::sync::Arc;

/// Clock and identifier source used when records are created.
///
/// Production uses the system clock and random UUIDs; tests inject
/// `FixedClock` and `SequentialIdGenerator`.
#[derive(Clone)]
pub struct CatalogEnvironment {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl CatalogEnvironment {
    /// Create an environment from explicit dependencies.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// System clock and random v4 identifiers.
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }

    /// Current time as epoch milliseconds.
    #[must_use]
    pub fn now_millis(&self) -> i64 {
        self.clock.now().timestamp_millis()
    }

    /// A fresh identifier in hyphenated form.
    #[must_use]
    pub fn next_id(&self) -> String {
        self.ids.next_id().to_string()
    }
}
