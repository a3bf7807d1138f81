//! Observer owning a provider registry and dispatching to it.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use stdlib_provider::{ProviderRegistry, ProviderType};
use tracing::Span;

use crate::capability::{
    with_error_reporter, with_logger, with_metrics, Capability, ErrorReportingProvider,
    LoggingProvider, MetricsProvider, ObserverConfig,
};
use crate::error::{ObserverError, ObserverResult};
use crate::{DefaultProvider, Severity};

/// Id of the default logging provider.
pub const DEFAULT_LOGGER_ID: &str = "observer.default.logger";
/// Id of the default error reporting provider.
pub const DEFAULT_ERROR_REPORTER_ID: &str = "observer.default.errorreporting";
/// Id of the default metrics provider.
pub const DEFAULT_METRICS_ID: &str = "observer.default.metrics";

/// Provider types an observer accepts.
pub const SUPPORTED_TYPES: [ProviderType; 3] = [
    ProviderType::Logger,
    ProviderType::ErrorReporter,
    ProviderType::Metrics,
];

/// Configuration stage of an [`Observer`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum ObserverState {
    /// No provider has been registered yet.
    Uninitialized,
    /// The first providers are registered.
    Initialized,
    /// Providers were registered again after initialization.
    Reconfigured,
}

impl ObserverState {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Uninitialized,
            1 => Self::Initialized,
            _ => Self::Reconfigured,
        }
    }
}

/// Returns configs placing one new [`DefaultProvider`] in every slot.
///
/// Each call builds its own provider, so observers wired from separate
/// calls keep separate logging flags.
#[must_use]
pub fn default_providers() -> Vec<ObserverConfig> {
    let provider = Arc::new(DefaultProvider::new());
    let logger = Arc::clone(&provider);
    let reporter = Arc::clone(&provider);
    vec![
        with_logger(DEFAULT_LOGGER_ID, move || Arc::clone(&logger)),
        with_error_reporter(DEFAULT_ERROR_REPORTER_ID, move || Arc::clone(&reporter)),
        with_metrics(DEFAULT_METRICS_ID, move || Arc::clone(&provider)),
    ]
}

/// Access point for logging, metrics and error reporting.
///
/// Each capability is looked up in the observer's registry on every call.
/// A missing capability turns the call into a no-op, so an observer with
/// nothing registered is safe to use and simply observes nothing.
pub struct Observer {
    registry: ProviderRegistry<Capability>,
    state: AtomicU8,
}

impl Default for Observer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("state", &self.state())
            .field("registry", &self.registry)
            .finish()
    }
}

impl Observer {
    /// Creates an observer with no providers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: ProviderRegistry::new(),
            state: AtomicU8::new(ObserverState::Uninitialized as u8),
        }
    }

    /// Creates an observer and registers `configs` without overwriting.
    ///
    /// # Errors
    ///
    /// Fails if a config has an unsupported type, a mismatched capability,
    /// or shares its type with another config.
    pub fn with_providers<I>(configs: I) -> ObserverResult<Self>
    where
        I: IntoIterator<Item = ObserverConfig>,
    {
        let observer = Self::new();
        observer.register_providers(false, configs)?;
        Ok(observer)
    }

    /// Creates an observer backed by [`DefaultProvider`] in every slot.
    #[must_use]
    pub fn with_defaults() -> Self {
        let observer = Self::new();
        if let Err(err) = observer.register_providers(false, default_providers()) {
            tracing::error!(%err, "failed to register default providers");
        }
        observer
    }

    /// Returns the configuration stage.
    #[must_use]
    pub fn state(&self) -> ObserverState {
        ObserverState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Registers one or more providers.
    ///
    /// Every config is checked before the registry changes: its type must be
    /// one of [`SUPPORTED_TYPES`], and its factory, invoked once here, must
    /// produce a capability for that type. Existing providers are
    /// overwritten only when `ignore_existing` is true.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError::UnsupportedProviderType`],
    /// [`ObserverError::CapabilityMismatch`], or
    /// [`ObserverError::Registry`] for duplicate types.
    pub fn register_providers<I>(&self, ignore_existing: bool, configs: I) -> ObserverResult<()>
    where
        I: IntoIterator<Item = ObserverConfig>,
    {
        let configs: Vec<_> = configs.into_iter().collect();
        for config in &configs {
            validate(config)?;
        }

        if configs.is_empty() {
            return Ok(());
        }

        self.registry.register(ignore_existing, configs)?;

        // only the first successful registration may claim `Initialized`
        if self
            .state
            .compare_exchange(
                ObserverState::Uninitialized as u8,
                ObserverState::Initialized as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            self.state
                .store(ObserverState::Reconfigured as u8, Ordering::Release);
        }
        Ok(())
    }

    /// Registers `configs`, overwriting existing providers.
    ///
    /// # Errors
    ///
    /// See [`register_providers`](Self::register_providers).
    pub fn update_config<I>(&self, configs: I) -> ObserverResult<()>
    where
        I: IntoIterator<Item = ObserverConfig>,
    {
        self.register_providers(true, configs)
    }

    /// Returns the capability registered for `provider_type`.
    #[must_use]
    pub fn find(&self, provider_type: ProviderType) -> Option<Capability> {
        self.registry.find(provider_type)
    }

    /// Returns the id registered for `provider_type`.
    #[must_use]
    pub fn provider_id(&self, provider_type: ProviderType) -> Option<String> {
        self.registry.id_of(provider_type)
    }

    /// Returns the current logging provider.
    #[must_use]
    pub fn logger(&self) -> Option<Arc<dyn LoggingProvider>> {
        self.find(ProviderType::Logger)?.into_logger()
    }

    /// Returns the current error reporting provider.
    #[must_use]
    pub fn error_reporter(&self) -> Option<Arc<dyn ErrorReportingProvider>> {
        self.find(ProviderType::ErrorReporter)?.into_error_reporter()
    }

    /// Returns the current metrics provider.
    #[must_use]
    pub fn metrics(&self) -> Option<Arc<dyn MetricsProvider>> {
        self.find(ProviderType::Metrics)?.into_metrics()
    }

    /// Logs `msg` at [`Severity::Info`].
    pub fn log(&self, msg: &str, key_values: &[&str]) {
        if let Some(logger) = self.logger() {
            logger.log(msg, key_values);
        }
    }

    /// Logs `msg` at `severity`.
    pub fn log_with_level(&self, severity: Severity, msg: &str, key_values: &[&str]) {
        if let Some(logger) = self.logger() {
            logger.log_with_level(severity, msg, key_values);
        }
    }

    /// Re-enables the current logging provider.
    pub fn enable_logging(&self) {
        if let Some(logger) = self.logger() {
            logger.enable_logging();
        }
    }

    /// Silences the current logging provider.
    pub fn disable_logging(&self) {
        if let Some(logger) = self.logger() {
            logger.disable_logging();
        }
    }

    /// Records a metric with the current metrics provider.
    pub fn meter(&self, ctx: &Span, metric: &str, values: &[&str]) {
        if let Some(metrics) = self.metrics() {
            metrics.meter(ctx, metric, values);
        }
    }

    /// Reports `err` with the current error reporting provider.
    ///
    /// Returns what the provider returns, or `None` when no reporter is
    /// registered.
    pub fn report_error(&self, err: anyhow::Error) -> Option<anyhow::Error> {
        self.error_reporter()?.report_error(err)
    }

    /// Closes every registered provider.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError::Registry`] listing providers that failed to close.
    pub fn close(&self) -> ObserverResult<()> {
        self.registry.close().map_err(ObserverError::from)
    }
}

fn validate(config: &ObserverConfig) -> ObserverResult<()> {
    let expected = config.provider_type();
    if !SUPPORTED_TYPES.contains(&expected) {
        return Err(ObserverError::UnsupportedProviderType {
            id: config.id().to_owned(),
            provider_type: expected,
        });
    }

    let actual = config.instance().provider_type();
    if actual != expected {
        tracing::warn!(id = config.id(), %expected, %actual, "provider capability mismatch");
        return Err(ObserverError::CapabilityMismatch {
            id: config.id().to_owned(),
            expected,
            actual,
        });
    }

    Ok(())
}
