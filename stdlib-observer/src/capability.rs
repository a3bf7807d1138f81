//! Capability traits and the typed registry entry that carries them.

use std::fmt;
use std::sync::Arc;

use stdlib_provider::{with_provider, CloseError, GenericProvider, ProviderConfig, ProviderType};
use tracing::Span;

use crate::Severity;

/// Registry config whose factory yields a [`Capability`].
pub type ObserverConfig = ProviderConfig<Capability>;

/// Structured logging backend.
pub trait LoggingProvider: GenericProvider {
    /// Logs `msg` at [`Severity::Info`].
    fn log(&self, msg: &str, key_values: &[&str]) {
        self.log_with_level(Severity::Info, msg, key_values);
    }

    /// Logs `msg` at `severity`.
    ///
    /// `key_values` alternates keys and values. A trailing key without a
    /// value pairs with the empty string.
    fn log_with_level(&self, severity: Severity, msg: &str, key_values: &[&str]);

    /// Resumes emitting log records.
    fn enable_logging(&self);

    /// Suppresses log records until [`enable_logging`](Self::enable_logging).
    fn disable_logging(&self);
}

/// Error reporting backend.
pub trait ErrorReportingProvider: GenericProvider {
    /// Reports `err`, returning whatever the backend chooses to hand back.
    fn report_error(&self, err: anyhow::Error) -> Option<anyhow::Error>;
}

/// Metrics backend.
pub trait MetricsProvider: GenericProvider {
    /// Records `values` under `metric`, in the context of `ctx`.
    fn meter(&self, ctx: &Span, metric: &str, values: &[&str]);
}

/// Implementation registered in an observer slot.
#[derive(Clone)]
pub enum Capability {
    /// Fills [`ProviderType::Logger`].
    Logger(Arc<dyn LoggingProvider>),
    /// Fills [`ProviderType::ErrorReporter`].
    ErrorReporter(Arc<dyn ErrorReportingProvider>),
    /// Fills [`ProviderType::Metrics`].
    Metrics(Arc<dyn MetricsProvider>),
}

impl Capability {
    /// Returns the slot this capability belongs in.
    #[must_use]
    pub const fn provider_type(&self) -> ProviderType {
        match self {
            Self::Logger(_) => ProviderType::Logger,
            Self::ErrorReporter(_) => ProviderType::ErrorReporter,
            Self::Metrics(_) => ProviderType::Metrics,
        }
    }

    /// Returns the logging provider, if this is one.
    #[must_use]
    pub fn into_logger(self) -> Option<Arc<dyn LoggingProvider>> {
        match self {
            Self::Logger(provider) => Some(provider),
            _ => None,
        }
    }

    /// Returns the error reporting provider, if this is one.
    #[must_use]
    pub fn into_error_reporter(self) -> Option<Arc<dyn ErrorReportingProvider>> {
        match self {
            Self::ErrorReporter(provider) => Some(provider),
            _ => None,
        }
    }

    /// Returns the metrics provider, if this is one.
    #[must_use]
    pub fn into_metrics(self) -> Option<Arc<dyn MetricsProvider>> {
        match self {
            Self::Metrics(provider) => Some(provider),
            _ => None,
        }
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Capability")
            .field(&self.provider_type())
            .finish()
    }
}

impl GenericProvider for Capability {
    fn close(&self) -> Result<(), CloseError> {
        match self {
            Self::Logger(provider) => provider.close(),
            Self::ErrorReporter(provider) => provider.close(),
            Self::Metrics(provider) => provider.close(),
        }
    }
}

/// Builds a [`ProviderType::Logger`] config.
#[must_use]
pub fn with_logger<F, L>(id: impl Into<String>, factory: F) -> ObserverConfig
where
    F: Fn() -> Arc<L> + Send + Sync + 'static,
    L: LoggingProvider + 'static,
{
    with_provider(id, ProviderType::Logger, move || {
        let provider: Arc<dyn LoggingProvider> = factory();
        Capability::Logger(provider)
    })
}

/// Builds a [`ProviderType::ErrorReporter`] config.
#[must_use]
pub fn with_error_reporter<F, E>(id: impl Into<String>, factory: F) -> ObserverConfig
where
    F: Fn() -> Arc<E> + Send + Sync + 'static,
    E: ErrorReportingProvider + 'static,
{
    with_provider(id, ProviderType::ErrorReporter, move || {
        let provider: Arc<dyn ErrorReportingProvider> = factory();
        Capability::ErrorReporter(provider)
    })
}

/// Builds a [`ProviderType::Metrics`] config.
#[must_use]
pub fn with_metrics<F, M>(id: impl Into<String>, factory: F) -> ObserverConfig
where
    F: Fn() -> Arc<M> + Send + Sync + 'static,
    M: MetricsProvider + 'static,
{
    with_provider(id, ProviderType::Metrics, move || {
        let provider: Arc<dyn MetricsProvider> = factory();
        Capability::Metrics(provider)
    })
}

/// Pairs up alternating keys and values.
///
/// A trailing key without a value pairs with the empty string.
#[must_use]
pub fn key_value_pairs<'a>(key_values: &[&'a str]) -> Vec<(&'a str, &'a str)> {
    key_values
        .chunks(2)
        .map(|pair| (pair[0], pair.get(1).copied().unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::DefaultProvider;

    #[test]
    fn even_key_values_pair_up() {
        assert_eq!(
            key_value_pairs(&["aa", "AA", "bb", "BB", "cc", "CC"]),
            vec![("aa", "AA"), ("bb", "BB"), ("cc", "CC")]
        );
    }

    #[test]
    fn odd_key_values_pad_with_empty_value() {
        assert_eq!(
            key_value_pairs(&["aa", "AA", "bb"]),
            vec![("aa", "AA"), ("bb", "")]
        );
        assert_eq!(key_value_pairs(&["only"]), vec![("only", "")]);
        assert!(key_value_pairs(&[]).is_empty());
    }

    #[test]
    fn typed_constructors_match_their_slot() {
        let logger = with_logger("test.logger", DefaultProvider::shared);
        assert_eq!(logger.provider_type(), ProviderType::Logger);
        assert_eq!(logger.instance().provider_type(), ProviderType::Logger);

        let reporter = with_error_reporter("test.errors", DefaultProvider::shared);
        assert!(reporter.instance().into_error_reporter().is_some());

        let metrics = with_metrics("test.metrics", DefaultProvider::shared);
        let capability = metrics.instance();
        assert!(capability.clone().into_logger().is_none());
        assert!(capability.into_metrics().is_some());
    }
}
