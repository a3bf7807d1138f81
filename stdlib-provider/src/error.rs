//! Error definitions for provider registration.

use thiserror::Error;

use crate::ProviderType;

/// Result alias used by registry operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Errors that can occur while registering or closing providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A provider for the same type is already registered and overwriting
    /// was not requested.
    #[error("provider of type '{provider_type}' already registered (id `{id}`)")]
    Duplicate {
        /// Identifier of the rejected config.
        id: String,
        /// Type slot that is already occupied.
        provider_type: ProviderType,
    },

    /// One or more providers reported a failure while closing.
    #[error("failed to close providers: {}", failed.join(", "))]
    Close {
        /// Identifiers of the providers whose `close` failed.
        failed: Vec<String>,
    },
}
