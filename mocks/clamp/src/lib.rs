//! # Mock CLAMP
//!
//! In-memory mock of the closed-loop management system. It serves loop
//! templates and the operational policy model catalog, and manages loop
//! instances: creation from a template, policy attachment and
//! configuration, and the policy/DCAE component actions (`submit`, `stop`,
//! `restart`, `deploy`, `undeploy`, `delete`).
//!
//! State lives in a single [`Store`](platform_mocks_runtime::Store); every
//! mutation is a [`LoopCommand`](reducer::LoopCommand) applied by the
//! [`LoopReducer`](reducer::LoopReducer).

pub mod catalog;
pub mod environment;
pub mod error;
pub mod fixtures;
pub mod handlers;
pub mod lifecycle;
pub mod loops;
pub mod policy;
pub mod reducer;
pub mod router;

pub use environment::LoopEnvironment;
pub use error::ClampError;
pub use reducer::{LoopAction, LoopCommand, LoopReducer, LoopReply, LoopState};
pub use router::build_router;

use platform_mocks_runtime::Store;

/// Port the real system listens on.
pub const DEFAULT_PORT: u16 = 30258;

/// The store behind every handler.
pub type LoopStore = Store<LoopState, LoopAction, LoopEnvironment, LoopReducer>;

/// Create a store holding the seeded dataset.
#[must_use]
pub fn build_store(env: LoopEnvironment) -> LoopStore {
    Store::new(LoopState::seeded(), LoopReducer, env)
}
