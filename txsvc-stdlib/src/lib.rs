//! Reusable building blocks for services.
//!
//! Depend on this crate to get the individual `stdlib-*` crates behind
//! feature flags. The provider registry is always available; the
//! environment accessors and the observer facade can be switched off.

#![warn(missing_docs, clippy::pedantic)]

/// Provider registry primitives.
pub use stdlib_provider as provider;

/// Environment variable accessors (enabled by `env` feature).
#[cfg(feature = "env")]
pub use stdlib_env as env;

/// Logging, metrics and error reporting facade (enabled by `observer` feature).
#[cfg(feature = "observer")]
pub use stdlib_observer as observer;
