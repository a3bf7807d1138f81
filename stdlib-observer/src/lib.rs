//! Logging, metrics and error reporting behind swappable providers.
//!
//! An [`Observer`] owns a provider registry with three slots: logger,
//! error reporter and metrics. Each call looks up the implementation that
//! currently fills the slot and delegates to it; an empty slot makes the
//! call a no-op, so code never fails for lack of an observability backend.
//!
//! Most call sites use the free functions ([`log`], [`log_with_level`],
//! [`meter`], [`report_error`]), which go through a process-wide default
//! observer pre-populated with [`DefaultProvider`]. Code that prefers
//! explicit wiring can build and pass its own [`Observer`].
//!
//! ```
//! use stdlib_observer::{log_with_level, report_error, Severity};
//!
//! log_with_level(Severity::Warn, "disk almost full", &["mount", "/var"]);
//!
//! let err = anyhow::anyhow!("upload failed");
//! assert!(report_error(err).is_some());
//! ```

#![warn(missing_docs, clippy::pedantic)]

mod capability;
mod default;
mod error;
mod global;
pub mod logging;
mod observer;
mod severity;

#[cfg(test)]
mod test_support;

/// Capability traits, the registry entry type, and typed config builders.
pub use capability::{
    key_value_pairs, with_error_reporter, with_logger, with_metrics, Capability,
    ErrorReportingProvider, LoggingProvider, MetricsProvider, ObserverConfig,
};
/// `tracing`-backed fallback provider.
pub use default::{DefaultProvider, METRICS_TARGET};
/// Error type and result alias for observer configuration.
pub use error::{ObserverError, ObserverResult};
/// Free functions operating on the process-wide default observer.
pub use global::{
    default_observer, disable_logging, enable_logging, find, log, log_with_level, meter,
    report_error, reset_default, set_default, update_config,
};
/// Logging initialization helpers.
pub use logging::{init_logging, init_logging_with};
/// Observer instances and their default wiring.
pub use observer::{
    default_providers, Observer, ObserverState, DEFAULT_ERROR_REPORTER_ID, DEFAULT_LOGGER_ID,
    DEFAULT_METRICS_ID, SUPPORTED_TYPES,
};
/// Severity levels.
pub use severity::Severity;
/// Provider registry primitives the observer is built on.
pub use stdlib_provider::{with_provider, GenericProvider, ProviderError, ProviderType};
