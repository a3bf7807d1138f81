//! Pluggable provider registry.
//!
//! A [`ProviderRegistry`] maps a [`ProviderType`] to a factory that
//! materializes the implementation currently backing that slot. Higher-level
//! facades such as the observer build on it to swap implementations at
//! runtime without touching call sites.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod provider_type;
mod registry;

/// Error type and result alias for registry operations.
pub use error::{ProviderError, ProviderResult};
/// Capability slot identifiers.
pub use provider_type::ProviderType;
/// Registry, configs, and the provider lifecycle hook.
pub use registry::{
    with_provider, CloseError, GenericProvider, ProviderConfig, ProviderFactory, ProviderRegistry,
};
