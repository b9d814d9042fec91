//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod articles;
pub mod middleware;
pub mod payments;

// Re-export key types for convenience
pub use articles::{articles_router, ArticlesAppState};
pub use payments::{payments_router, PaymentsAppState};
