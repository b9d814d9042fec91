//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a JWT token.
//! They have no external dependencies - any identity provider can populate
//! them via the `SessionValidator` port.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a validated JWT.
///
/// This is a domain type with no provider dependencies. The identity
/// provider owns the canonical user record; this struct carries only the
/// claims the backend actually uses.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the identity provider.
    pub id: UserId,

    /// User's email address from the token claims.
    pub email: String,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    ///
    /// This is typically called by the `SessionValidator` adapter after
    /// successfully validating a JWT token.
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// Identity provider unreachable or misbehaving.
    #[error("Authentication service unavailable: {0}")]
    ServiceUnavailable(String),
}
