//! Article-specific error types.

use crate::domain::foundation::{ArticleId, DomainError, ErrorCode};

/// Article catalogue errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleError {
    /// Article was not found.
    NotFound(ArticleId),

    /// Validation failed on article input.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl ArticleError {
    pub fn not_found(id: ArticleId) -> Self {
        ArticleError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ArticleError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ArticleError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ArticleError::NotFound(_) => ErrorCode::ArticleNotFound,
            ArticleError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ArticleError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            ArticleError::NotFound(id) => format!("Article not found: {}", id),
            ArticleError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ArticleError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ArticleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ArticleError {}

impl From<DomainError> for ArticleError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ArticleNotFound => ArticleError::Infrastructure(err.to_string()),
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                ArticleError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => ArticleError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ArticleError> for DomainError {
    fn from(err: ArticleError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
