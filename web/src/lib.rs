//! Axum integration shared by the platform mock servers.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract data** from the request (path, query, JSON, multipart)
//! 3. **Build a command** and dispatch it through the `Store`
//! 4. **Wait** for the matching completion action
//! 5. **Map the outcome** to an HTTP response or an [`AppError`]
//!
//! Read-only endpoints skip steps 3 and 4 and read the state directly.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod server;

// Re-export key types for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::AppError;
pub use extractors::CorrelationId;
pub use middleware::{correlation_id, CORRELATION_ID_HEADER};
pub use server::{init_tracing, shutdown_signal};
