//! Shared web-service plumbing for Solara services: health endpoints,
//! request-id middleware, tracing setup, and timestamp serialization.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
