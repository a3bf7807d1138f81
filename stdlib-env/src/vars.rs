//! Typed accessors for environment variables.

use std::env;

/// Returns the value of `name`, or `default` if it is not set.
///
/// A variable that is set to the empty string is returned as-is. Values
/// that are not valid UTF-8 are converted lossily.
#[must_use]
pub fn get_string(name: &str, default: &str) -> String {
    env::var_os(name).map_or_else(
        || default.to_owned(),
        |value| value.to_string_lossy().into_owned(),
    )
}

/// Returns `name` parsed as a signed integer.
///
/// Falls back to `default` when the variable is unset or does not parse.
#[must_use]
pub fn get_int(name: &str, default: i64) -> i64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Returns `name` interpreted as a boolean.
///
/// `true`, `yes` and `1` (in any case) are true; any other value is false.
/// `default` is only used when the variable is unset.
#[must_use]
pub fn get_bool(name: &str, default: bool) -> bool {
    match env::var_os(name) {
        Some(value) => matches!(
            value.to_string_lossy().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1"
        ),
        None => default,
    }
}

/// Returns `true` if `name` is set to a non-empty value.
#[must_use]
pub fn exists(name: &str) -> bool {
    env::var_os(name).is_some_and(|value| !value.is_empty())
}
