use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::level_filters::LevelFilter;
use tracing::Span;
use tracing_subscriber::fmt::MakeWriter;
use txsvc_stdlib::observer::{
    self, with_logger, GenericProvider, LoggingProvider, Observer, ObserverError, ProviderError,
    ProviderType, Severity,
};
use txsvc_stdlib::provider::{with_provider, ProviderRegistry};

// The default observer is process-wide; tests touching it run one at a time.
static GLOBAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    GLOBAL.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Buffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture(f: impl FnOnce()) -> String {
    let buffer = Buffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(LevelFilter::TRACE)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[derive(Default)]
struct CountingLogger {
    messages: Mutex<Vec<String>>,
}

impl GenericProvider for CountingLogger {}

impl LoggingProvider for CountingLogger {
    fn log_with_level(&self, _severity: Severity, msg: &str, _key_values: &[&str]) {
        self.messages.lock().unwrap().push(msg.to_owned());
    }

    fn enable_logging(&self) {}

    fn disable_logging(&self) {}
}

#[test]
fn default_observer_serves_all_observer_slots() {
    let _guard = serial();
    observer::reset_default();

    assert!(observer::find(ProviderType::Logger).is_some());
    assert!(observer::find(ProviderType::ErrorReporter).is_some());
    assert!(observer::find(ProviderType::Metrics).is_some());
    assert!(observer::find(ProviderType::Storage).is_none());
}

#[test]
fn free_functions_dispatch_to_default_provider() {
    let _guard = serial();
    observer::reset_default();

    let output = capture(|| {
        observer::log("info message", &[]);
        observer::log("message with even KVs", &["aa", "AA", "bb", "BB", "cc", "CC"]);
        observer::log("message with odd KVs", &["aa", "AA", "bb"]);
        observer::log_with_level(Severity::Debug, "LevelDebug message", &[]);
        observer::log_with_level(Severity::Notice, "LevelNotice message", &[]);
        observer::meter(&Span::current(), "sample", &["aa", "bb"]);
    });

    assert!(output.contains("info message"), "{output}");
    assert!(output.contains(r#"("cc", "CC")"#), "{output}");
    assert!(output.contains(r#"("bb", "")"#), "{output}");
    assert!(output.contains("DEBUG"), "{output}");
    assert!(output.contains("severity=notice"), "{output}");
    assert!(output.contains("metric=\"sample\""), "{output}");
}

#[test]
fn report_error_acknowledges_with_same_error() {
    let _guard = serial();
    observer::reset_default();

    let err = anyhow::anyhow!("an error happened");
    let expected = err.to_string();
    let returned = observer::report_error(err).expect("default reporter returns the error");
    assert_eq!(returned.to_string(), expected);
}

#[test]
fn disable_logging_silences_until_enabled() {
    let _guard = serial();
    observer::reset_default();

    observer::disable_logging();
    assert!(observer::find(ProviderType::Logger).is_some());
    let silent = capture(|| observer::log("should NOT see this message", &[]));

    observer::enable_logging();
    let loud = capture(|| observer::log("SHOULD see this message", &[]));

    assert!(silent.is_empty(), "{silent}");
    assert!(loud.contains("SHOULD see this message"), "{loud}");
}

#[test]
fn reset_default_restores_logging() {
    let _guard = serial();
    observer::reset_default();

    observer::disable_logging();
    let silent = capture(|| observer::log("before reset", &[]));

    observer::reset_default();
    let loud = capture(|| observer::log("after reset", &[]));

    assert!(silent.is_empty(), "{silent}");
    assert!(loud.contains("after reset"), "{loud}");
}

#[test]
fn disabling_default_observer_leaves_explicit_observer_logging() {
    let _guard = serial();
    observer::reset_default();
    let explicit = Observer::with_providers(observer::default_providers()).unwrap();

    observer::disable_logging();
    let output = capture(|| {
        observer::log("from default", &[]);
        explicit.log("from explicit", &[]);
    });
    observer::enable_logging();

    assert!(!output.contains("from default"), "{output}");
    assert!(output.contains("from explicit"), "{output}");
}

#[test]
fn empty_observer_observes_nothing() {
    let _guard = serial();
    let previous = observer::set_default(Observer::new());

    let output = capture(|| {
        observer::log("nobody listens", &["k", "v"]);
        observer::log_with_level(Severity::Alert, "still nobody", &[]);
        observer::meter(&Span::none(), "sample", &[]);
        observer::enable_logging();
        observer::disable_logging();
        assert!(observer::report_error(anyhow::anyhow!("dropped")).is_none());
    });

    assert!(output.is_empty(), "{output}");
    assert_eq!(previous.state(), observer::ObserverState::Initialized);
    observer::reset_default();
}

#[test]
fn update_config_swaps_logger_for_free_functions() {
    let _guard = serial();
    observer::reset_default();

    let logger = Arc::new(CountingLogger::default());
    let source = Arc::clone(&logger);
    observer::update_config([with_logger("test.counting", move || Arc::clone(&source))]).unwrap();

    observer::log("routed", &[]);
    assert_eq!(*logger.messages.lock().unwrap(), vec!["routed".to_owned()]);
    assert_eq!(
        observer::default_observer().state(),
        observer::ObserverState::Reconfigured
    );

    observer::reset_default();
}

#[test]
fn second_config_for_same_type_names_the_type() {
    let registry = ProviderRegistry::new();
    registry
        .register(false, [with_provider("x", ProviderType::Logger, || 1_u8)])
        .unwrap();

    let err = registry
        .register(false, [with_provider("y", ProviderType::Logger, || 2_u8)])
        .expect_err("second logger should be rejected");

    assert!(err.to_string().contains("LOGGER"));
    assert_eq!(registry.find(ProviderType::Logger), Some(1));
}

#[test]
fn observer_rejects_unsupported_type() {
    let config = with_provider("storage", ProviderType::Storage, || {
        observer::Capability::Metrics(observer::DefaultProvider::shared())
    });

    let err = Observer::with_providers([config]).expect_err("storage is not supported");
    assert!(matches!(err, ObserverError::UnsupportedProviderType { .. }));
    assert!(err.to_string().contains("STORAGE"));
}

#[test]
fn observer_duplicate_surfaces_registry_error() {
    let err = Observer::with_providers([
        with_logger("test1", observer::DefaultProvider::shared),
        with_logger("test2", observer::DefaultProvider::shared),
    ])
    .expect_err("duplicate logger");

    assert!(matches!(
        err,
        ObserverError::Registry(ProviderError::Duplicate { ref id, .. }) if id == "test2"
    ));
}

#[test]
fn env_feature_exposes_level_parsing() {
    assert_eq!(
        txsvc_stdlib::env::parse_log_level("debug"),
        LevelFilter::DEBUG
    );
}
