//! Injected dependencies of the loop reducer.

use chrono::SecondsFormat;
use platform_mocks_core::environment::{Clock, IdGenerator, SystemClock, UuidGenerator};
use std::sync::Arc;

/// Clock and identifier source for loop creation and policy attachment.
#[derive(Clone)]
pub struct LoopEnvironment {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl LoopEnvironment {
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

    /// Current time, RFC 3339 with a `Z` suffix.
    #[must_use]
    pub fn now_rfc3339(&self) -> String {
        self.clock.now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// A fresh identifier in hyphenated form.
    #[must_use]
    pub fn next_id(&self) -> String {
        self.ids.next_id().to_string()
    }
}
