//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration (identity provider JWTs)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 signing secret from the identity provider
    pub jwt_secret: String,

    /// Expected audience claim in access tokens
    #[serde(default = "default_audience")]
    pub jwt_audience: String,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_SECRET"));
        }
        Ok(())
    }
}

fn default_audience() -> String {
    "authenticated".to_string()
}
