//! Session validation port for JWT token validation.
//!
//! This port defines the contract for validating access tokens and
//! extracting user identity. It is provider-agnostic - the managed
//! identity service owns session issuance and sign-out; this backend only
//! checks tokens it is handed.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// HTTP middleware uses this to validate Bearer tokens and extract the
/// authenticated user.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature
/// - Validate expiry and audience claims
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a JWT access token and return the authenticated user.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
