//! JWT adapter for identity provider token validation.
//!
//! This adapter implements the `SessionValidator` port for identity
//! providers that sign access tokens with a shared HS256 secret. It
//! validates signature, expiry, and audience, then maps claims to the
//! domain `AuthenticatedUser` type. Session issuance and sign-out stay
//! with the provider.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Configuration for the JWT validator.
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared signing secret from the identity provider.
    secret: SecretString,

    /// Expected audience claim in tokens.
    audience: String,
}

impl JwtConfig {
    /// Create a new configuration.
    pub fn new(secret: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
            audience: audience.into(),
        }
    }
}

/// Claims this backend reads from provider tokens.
#[derive(Debug, Deserialize)]
struct Claims {
    /// Subject - the provider's user identifier.
    sub: String,

    /// User email, when the provider includes it.
    #[serde(default)]
    email: Option<String>,
}

/// HS256 JWT implementation of the SessionValidator port.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    /// Create a new validator from configuration.
    pub fn new(config: JwtConfig) -> Self {
        let decoding_key =
            DecodingKey::from_secret(config.secret.expose_secret().as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&config.audience]);

        Self {
            decoding_key,
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

        let claims = token_data.claims;
        let user_id = UserId::new(claims.sub).map_err(|_| AuthError::InvalidToken)?;
        let email = claims.email.unwrap_or_default();

        Ok(AuthenticatedUser::new(user_id, email))
    }
}
