//! `LOG_LEVEL` parsing.

use tracing::level_filters::LevelFilter;

use crate::get_string;

/// Environment variable selecting the minimum log level.
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// Maps a level name to a filter.
///
/// Accepts `trace`, `debug`, `info`, `warn` and `error` in any case.
/// Anything else, including the empty string, disables logging.
#[must_use]
pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::OFF,
    }
}

/// Reads [`LOG_LEVEL`] from the environment.
#[must_use]
pub fn log_level() -> LevelFilter {
    parse_log_level(&get_string(LOG_LEVEL, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_parse() {
        assert_eq!(parse_log_level("trace"), LevelFilter::TRACE);
        assert_eq!(parse_log_level("debug"), LevelFilter::DEBUG);
        assert_eq!(parse_log_level("INFO"), LevelFilter::INFO);
        assert_eq!(parse_log_level("Warn"), LevelFilter::WARN);
        assert_eq!(parse_log_level("error"), LevelFilter::ERROR);
    }

    #[test]
    fn unknown_levels_disable_logging() {
        assert_eq!(parse_log_level("invalid"), LevelFilter::OFF);
        assert_eq!(parse_log_level(""), LevelFilter::OFF);
    }
}
