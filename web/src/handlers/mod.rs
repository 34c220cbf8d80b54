//! HTTP request handlers shared by every mock server.

pub mod health;

pub use health::{liveness, readiness};
