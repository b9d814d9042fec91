//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `stripe` - Payment provider (checkout sessions, webhook verification)
//! - `postgres` - Persistence (articles, unlock records)
//! - `auth` - Identity provider token validation
//! - `http` - REST API endpoint exposure

pub mod auth;
pub mod http;
pub mod postgres;
pub mod stripe;
