//! Walkthrough of the observer facade: defaults, swapping providers, and
//! explicit observer instances.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use stdlib_observer::{
    self as observer, with_metrics, GenericProvider, MetricsProvider, Observer, Severity,
};
use tracing::level_filters::LevelFilter;
use tracing::{info, info_span, Span};

#[derive(Parser, Debug)]
#[command(about = "Exercise the observer facade")]
struct Args {
    /// Minimum log level; defaults to the LOG_LEVEL environment variable.
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Default)]
struct CountingMetrics {
    recorded: AtomicU64,
}

impl GenericProvider for CountingMetrics {}

impl MetricsProvider for CountingMetrics {
    fn meter(&self, _ctx: &Span, metric: &str, values: &[&str]) {
        let total = self.recorded.fetch_add(1, Ordering::Relaxed) + 1;
        info!(metric, ?values, total, "metric counted");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = args.log_level.as_deref().map_or_else(
        stdlib_env::log_level,
        stdlib_env::parse_log_level,
    );
    observer::init_logging_with(level)?;

    info!("=== Observer facade demo ===");

    default_providers(level);
    swap_metrics()?;
    explicit_observer()?;

    observer::default_observer()
        .close()
        .context("closing providers")?;
    Ok(())
}

/// Example 1: the default observer works without any setup.
fn default_providers(level: LevelFilter) {
    info!("--- Example 1: Default providers ---");

    observer::log("service starting", &["version", env!("CARGO_PKG_VERSION")]);
    observer::log_with_level(Severity::Warn, "cache cold", &["region"]);

    let span = info_span!("request", path = "/health");
    observer::meter(&span, "requests", &["status", "200"]);

    observer::disable_logging();
    observer::log("this line is suppressed", &[]);
    observer::enable_logging();
    // enabling opens the filter to TRACE; go back to the requested level
    observer::logging::set_max_level(level);

    let err = anyhow::anyhow!("connection reset").context("fetching settings");
    if let Some(err) = observer::report_error(err) {
        info!(%err, "error acknowledged");
    }
}

/// Example 2: replace the metrics provider of the default observer.
fn swap_metrics() -> Result<()> {
    info!("--- Example 2: Swapping the metrics provider ---");

    let metrics = Arc::new(CountingMetrics::default());
    let source = Arc::clone(&metrics);
    observer::update_config([with_metrics("demo.metrics.counting", move || {
        Arc::clone(&source)
    })])?;

    for status in ["200", "200", "503"] {
        observer::meter(&Span::current(), "requests", &["status", status]);
    }

    info!(
        recorded = metrics.recorded.load(Ordering::Relaxed),
        state = ?observer::default_observer().state(),
        "metrics provider swapped"
    );
    Ok(())
}

/// Example 3: an explicitly wired observer next to the default one.
fn explicit_observer() -> Result<()> {
    info!("--- Example 3: Explicit observer ---");

    let silent = Observer::new();
    silent.log("nobody is listening", &[]);
    info!(
        reported = silent.report_error(anyhow::anyhow!("ignored")).is_some(),
        "empty observer"
    );

    let wired = Observer::with_providers(observer::default_providers())?;
    wired.log_with_level(Severity::Notice, "explicit observer ready", &["slots", "3"]);

    let previous = observer::set_default(wired);
    info!(state = ?previous.state(), "previous default observer replaced");
    Ok(())
}
