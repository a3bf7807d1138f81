//! Error types for observer configuration.

use stdlib_provider::{ProviderError, ProviderType};
use thiserror::Error;

/// Errors surfaced while configuring an observer.
#[derive(Debug, Error)]
pub enum ObserverError {
    /// The config targets a slot the observer does not serve.
    #[error("unsupported provider type '{provider_type}' (id `{id}`)")]
    UnsupportedProviderType {
        /// Identifier of the rejected config.
        id: String,
        /// The unsupported slot.
        provider_type: ProviderType,
    },

    /// The factory produced a capability that does not fit the config's slot.
    #[error("provider `{id}` registered as '{expected}' but provides '{actual}'")]
    CapabilityMismatch {
        /// Identifier of the rejected config.
        id: String,
        /// Slot named by the config.
        expected: ProviderType,
        /// Slot the produced capability actually fills.
        actual: ProviderType,
    },

    /// The underlying registry rejected the registration.
    #[error(transparent)]
    Registry(#[from] ProviderError),

    /// The global logging subscriber could not be installed.
    #[error("failed to initialize logging: {reason}")]
    Logging {
        /// Human-readable reason returned by the subscriber.
        reason: String,
    },
}

/// Result alias for observer operations.
pub type ObserverResult<T> = Result<T, ObserverError>;
