//! # Mock SDC
//!
//! In-memory mock of the service-design/catalog system used by the
//! closed-loop test suites. It covers:
//!
//! - the onboarding API: vendor license models, vendor software products,
//!   package upload and the version pipeline up to `Create_Package`
//! - the designer UI catalog: resources, services, component instances,
//!   artifacts, inputs and properties, and their certification lifecycle
//! - the distribution client API with recorded distribution events
//!
//! State lives in a single [`Store`](platform_mocks_runtime::Store); every
//! mutation is a [`CatalogCommand`](reducer::CatalogCommand) applied by the
//! [`CatalogReducer`](reducer::CatalogReducer).
//!
//! ## Example
//!
//! ```ignore
//! let store = mock_sdc::build_store(CatalogEnvironment::production())?;
//! let app = mock_sdc::router::build_router(Arc::new(store));
//! ```

pub mod catalog;
pub mod environment;
pub mod error;
pub mod fixtures;
pub mod handlers;
pub mod lifecycle;
pub mod onboarding;
pub mod reducer;
pub mod router;

pub use environment::CatalogEnvironment;
pub use error::SdcError;
pub use reducer::{CatalogAction, CatalogCommand, CatalogReducer, CatalogReply, CatalogState};
pub use router::build_router;

use platform_mocks_runtime::Store;

/// Port the real system listens on.
pub const DEFAULT_PORT: u16 = 30206;

/// The store behind every handler.
pub type CatalogStore = Store<CatalogState, CatalogAction, CatalogEnvironment, CatalogReducer>;

/// Create a store holding the seeded dataset.
///
/// # Errors
///
/// Fails if the embedded distribution events fixture does not parse.
pub fn build_store(env: CatalogEnvironment) -> Result<CatalogStore, serde_json::Error> {
    let state = CatalogState::seeded(fixtures::distribution_events()?);
    Ok(Store::new(state, CatalogReducer, env))
}
