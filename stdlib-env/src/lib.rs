//! Environment-driven configuration.
//!
//! Typed accessors over process environment variables that fall back to a
//! caller-supplied default, plus parsing of the `LOG_LEVEL` convention used
//! by the observer's logging setup.

#![warn(missing_docs, clippy::pedantic)]

mod level;
mod vars;

/// `LOG_LEVEL` handling.
pub use level::{log_level, parse_log_level, LOG_LEVEL};
/// Typed variable accessors.
pub use vars::{exists, get_bool, get_int, get_string};
