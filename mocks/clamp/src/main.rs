//! Mock CLAMP server
//!
//! Serves the loop management mock on port 30258 until Ctrl+C or SIGTERM.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin mock-clamp
//!
//! # Override the bind address
//! MOCK_CLAMP_HOST=127.0.0.1 MOCK_CLAMP_PORT=8081 cargo run --bin mock-clamp
//! ```

use mock_clamp::{build_router, build_store, LoopEnvironment, DEFAULT_PORT};
use platform_mocks_web::{correlation_id, init_tracing, shutdown_signal, ServerConfig};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env(
        "MOCK_CLAMP",
        DEFAULT_PORT,
        "info,mock_clamp=debug,tower_http=debug",
    )?;
    init_tracing(&config.log_filter);

    let store = Arc::new(build_store(LoopEnvironment::production()));
    let app = build_router(Arc::clone(&store))
        .layer(axum::middleware::from_fn(correlation_id))
        .layer(TraceLayer::new_for_http());

    let listener = config.bind().await?;
    let address = listener.local_addr()?;
    tracing::info!(%address, "Mock CLAMP listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.shutdown(Duration::from_secs(5)).await?;
    tracing::info!("Mock CLAMP stopped");
    Ok(())
}
