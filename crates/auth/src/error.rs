//! Application-level authentication error taxonomy.

use thiserror::Error;

use crate::provider::ProviderError;

/// Normalized authentication error.
///
/// Raw provider codes are an unstable, provider-specific vocabulary; this
/// closed set is what the rest of the application switches on. The `Display`
/// text is what pages show inline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Client or project misconfiguration (bad API key, unknown auth domain).
    #[error("authentication configuration error: {0}")]
    ConfigurationError(String),

    #[error("account not found, sign up to create a new account")]
    AccountNotFound,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("this email is already registered, sign in instead")]
    EmailAlreadyInUse,

    #[error("password is too weak, use at least 6 characters")]
    WeakPassword,

    #[error("email/password sign-in is not enabled for this project")]
    OperationNotAllowed,

    #[error("network error, check your internet connection")]
    NetworkFailure,

    /// Anything the mapping table does not recognize; carries the provider's
    /// raw message.
    #[error("{0}")]
    Unknown(String),
}

impl AuthError {
    /// Map a raw provider error onto the application taxonomy.
    ///
    /// The single place that understands the provider's code vocabulary.
    /// Nothing outside this function may match on raw codes.
    pub fn from_provider(err: &ProviderError) -> Self {
        match err.code() {
            "auth/invalid-api-key" | "auth/api-key-not-valid" => {
                Self::ConfigurationError("invalid API key".to_string())
            }
            "auth/configuration-not-found" => {
                Self::ConfigurationError("auth domain or project not found".to_string())
            }
            "auth/user-not-found" => Self::AccountNotFound,
            "auth/wrong-password" | "auth/invalid-credential" => Self::InvalidCredentials,
            "auth/email-already-in-use" => Self::EmailAlreadyInUse,
            "auth/weak-password" => Self::WeakPassword,
            "auth/operation-not-allowed" => Self::OperationNotAllowed,
            "auth/network-request-failed" => Self::NetworkFailure,
            _ => Self::Unknown(err.message().to_string()),
        }
    }
}

impl From<ProviderError> for AuthError {
    fn from(err: ProviderError) -> Self {
        Self::from_provider(&err)
    }
}
