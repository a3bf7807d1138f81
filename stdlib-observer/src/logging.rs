//! Global `tracing` subscriber with a reloadable level filter.
//!
//! [`init_logging`] installs a `fmt` subscriber whose minimum level can be
//! changed at runtime. The default provider uses that hook to silence all
//! output when logging is disabled.

use std::sync::OnceLock;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, Registry};

use crate::error::{ObserverError, ObserverResult};

static FILTER: OnceLock<reload::Handle<LevelFilter, Registry>> = OnceLock::new();

/// Installs the global subscriber at the level named by `LOG_LEVEL`.
///
/// # Errors
///
/// Returns [`ObserverError::Logging`] if a global subscriber is already set.
pub fn init_logging() -> ObserverResult<()> {
    init_logging_with(stdlib_env::log_level())
}

/// Installs the global subscriber at `level`.
///
/// # Errors
///
/// Returns [`ObserverError::Logging`] if a global subscriber is already set.
pub fn init_logging_with(level: LevelFilter) -> ObserverResult<()> {
    let (filter, handle) = reload::Layer::new(level);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()
        .map_err(|err| ObserverError::Logging {
            reason: err.to_string(),
        })?;

    // try_init succeeds at most once per process
    let _ = FILTER.set(handle);
    Ok(())
}

/// Changes the minimum level of the subscriber installed by [`init_logging`].
///
/// Returns `false` when no such subscriber is installed.
pub fn set_max_level(level: LevelFilter) -> bool {
    FILTER
        .get()
        .is_some_and(|handle| handle.modify(|filter| *filter = level).is_ok())
}

/// Re-reads `LOG_LEVEL` and applies it; see [`set_max_level`].
pub fn set_log_level() -> bool {
    set_max_level(stdlib_env::log_level())
}

/// Returns the level currently applied by the reloadable filter.
#[must_use]
pub fn max_level() -> Option<LevelFilter> {
    FILTER.get().and_then(|handle| handle.clone_current())
}
