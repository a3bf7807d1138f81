//! Fallback provider backed by `tracing`.

use std::backtrace::BacktraceStatus;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock};

use stdlib_provider::GenericProvider;
use tracing::level_filters::LevelFilter;
use tracing::{error, trace, Span};

use crate::capability::{
    key_value_pairs, ErrorReportingProvider, LoggingProvider, MetricsProvider,
};
use crate::{logging, Severity};

/// Target used for metric records.
pub const METRICS_TARGET: &str = "metrics";

static SHARED: LazyLock<Arc<DefaultProvider>> = LazyLock::new(|| Arc::new(DefaultProvider::new()));

// `tracing` callsites need a level known at compile time.
macro_rules! event_at {
    ($severity:expr, $($arg:tt)+) => {
        match $severity {
            Severity::Trace => tracing::trace!($($arg)+),
            Severity::Debug => tracing::debug!($($arg)+),
            Severity::Info | Severity::Notice => tracing::info!($($arg)+),
            Severity::Warn => tracing::warn!($($arg)+),
            Severity::Error | Severity::Alert => tracing::error!($($arg)+),
        }
    };
}

/// Provider installed in every slot of a default observer.
///
/// Logs become `tracing` events at the mapped level, metrics become
/// `TRACE` events under the [`METRICS_TARGET`] target for offline
/// aggregation, and reported errors are logged at `ERROR` and handed back
/// unchanged.
#[derive(Debug)]
pub struct DefaultProvider {
    enabled: AtomicBool,
}

impl Default for DefaultProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultProvider {
    /// Creates a provider with logging enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
        }
    }

    /// Returns the process-wide instance.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Returns `true` unless logging has been disabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

impl GenericProvider for DefaultProvider {}

impl LoggingProvider for DefaultProvider {
    fn log_with_level(&self, severity: Severity, msg: &str, key_values: &[&str]) {
        if !self.is_enabled() {
            return;
        }

        if key_values.is_empty() {
            event_at!(severity, severity = %severity, "{msg}");
        } else {
            let values = key_value_pairs(key_values);
            event_at!(severity, severity = %severity, values = ?values, "{msg}");
        }
    }

    /// Sets the flag and, if [`init_logging`](crate::init_logging) installed
    /// the global subscriber, opens its filter to TRACE.
    ///
    /// The filter is not restored to the `LOG_LEVEL` selection; call
    /// [`logging::set_log_level`] for that.
    fn enable_logging(&self) {
        self.enabled.store(true, Ordering::Release);
        logging::set_max_level(LevelFilter::TRACE);
    }

    /// Clears the flag and, if [`init_logging`](crate::init_logging)
    /// installed the global subscriber, closes its filter. The closed filter
    /// also hides `meter` and `report_error` records.
    fn disable_logging(&self) {
        self.enabled.store(false, Ordering::Release);
        logging::set_max_level(LevelFilter::OFF);
    }
}

impl ErrorReportingProvider for DefaultProvider {
    fn report_error(&self, err: anyhow::Error) -> Option<anyhow::Error> {
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let backtrace = err.backtrace();

        if backtrace.status() == BacktraceStatus::Captured {
            error!(error = %err, causes = ?causes, backtrace = %backtrace, "error reported");
        } else {
            error!(error = %err, causes = ?causes, "error reported");
        }

        Some(err)
    }
}

impl MetricsProvider for DefaultProvider {
    fn meter(&self, ctx: &Span, metric: &str, values: &[&str]) {
        trace!(target: METRICS_TARGET, parent: ctx, metric, values = ?values, "metric");
    }
}
