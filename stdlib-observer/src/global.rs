//! Process-wide default observer and the free functions that use it.
//!
//! The default observer is built on first use with [`DefaultProvider`]
//! in every slot. It can be reconfigured in place with [`update_config`]
//! or replaced wholesale with [`set_default`]; readers always see either
//! the old or the new observer, never a mix.
//!
//! [`DefaultProvider`]: crate::DefaultProvider

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use stdlib_provider::ProviderType;
use tracing::Span;

use crate::capability::{Capability, ObserverConfig};
use crate::error::ObserverResult;
use crate::{Observer, Severity};

static DEFAULT: LazyLock<ArcSwap<Observer>> =
    LazyLock::new(|| ArcSwap::from_pointee(Observer::with_defaults()));

/// Returns the current default observer.
#[must_use]
pub fn default_observer() -> Arc<Observer> {
    DEFAULT.load_full()
}

/// Makes `observer` the default, returning the previous one.
pub fn set_default(observer: impl Into<Arc<Observer>>) -> Arc<Observer> {
    DEFAULT.swap(observer.into())
}

/// Restores a fresh default observer, returning the previous one.
pub fn reset_default() -> Arc<Observer> {
    set_default(Observer::with_defaults())
}

/// Registers `configs` on the default observer, overwriting existing providers.
///
/// # Errors
///
/// See [`Observer::register_providers`].
pub fn update_config<I>(configs: I) -> ObserverResult<()>
where
    I: IntoIterator<Item = ObserverConfig>,
{
    DEFAULT.load().update_config(configs)
}

/// Returns the capability the default observer holds for `provider_type`.
#[must_use]
pub fn find(provider_type: ProviderType) -> Option<Capability> {
    DEFAULT.load().find(provider_type)
}

/// Logs `msg` at [`Severity::Info`].
pub fn log(msg: &str, key_values: &[&str]) {
    DEFAULT.load().log(msg, key_values);
}

/// Logs `msg` at `severity`.
pub fn log_with_level(severity: Severity, msg: &str, key_values: &[&str]) {
    DEFAULT.load().log_with_level(severity, msg, key_values);
}

/// Re-enables logging on the default observer.
pub fn enable_logging() {
    DEFAULT.load().enable_logging();
}

/// Disables logging on the default observer.
pub fn disable_logging() {
    DEFAULT.load().disable_logging();
}

/// Records `values` under `metric`.
pub fn meter(ctx: &Span, metric: &str, values: &[&str]) {
    DEFAULT.load().meter(ctx, metric, values);
}

/// Reports `err` through the default observer.
///
/// With the default provider the same error is handed back; `None` means
/// no reporter is registered.
pub fn report_error(err: anyhow::Error) -> Option<anyhow::Error> {
    DEFAULT.load().report_error(err)
}
