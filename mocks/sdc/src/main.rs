//! Mock SDC server
//!
//! Serves the catalog mock on port 30206 until Ctrl+C or SIGTERM.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin mock-sdc
//!
//! # Override the bind address
//! MOCK_SDC_HOST=127.0.0.1 MOCK_SDC_PORT=8080 cargo run --bin mock-sdc
//! ```

use mock_sdc::{build_router, build_store, CatalogEnvironment, DEFAULT_PORT};
use platform_mocks_web::{correlation_id, init_tracing, shutdown_signal, ServerConfig};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env(
        "MOCK_SDC",
        DEFAULT_PORT,
        "info,mock_sdc=debug,tower_http=debug",
    )?;
    init_tracing(&config.log_filter);

    let store = Arc::new(build_store(CatalogEnvironment::production())?);
    let app = build_router(Arc::clone(&store))
        .layer(axum::middleware::from_fn(correlation_id))
        .layer(TraceLayer::new_for_http());

    let listener = config.bind().await?;
    let address = listener.local_addr()?;
    tracing::info!(%address, "Mock SDC listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.shutdown(Duration::from_secs(5)).await?;
    tracing::info!("Mock SDC stopped");
    Ok(())
}
