//! Log severities.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::Level;

/// Severity attached to a log record, ordered from least to most severe.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fine-grained records, used for metric emission.
    Trace,
    /// Diagnostic detail.
    Debug,
    /// Routine information.
    #[default]
    Info,
    /// Normal but significant events.
    Notice,
    /// Something unexpected that does not stop the caller.
    Warn,
    /// A failed operation.
    Error,
    /// Requires immediate attention.
    Alert,
}

impl Severity {
    /// Returns the lower-case name of the severity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Notice => "notice",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Alert => "alert",
        }
    }

    /// Returns the `tracing` level records of this severity are emitted at.
    ///
    /// `tracing` has no notice or alert levels; they fold into `INFO` and
    /// `ERROR` respectively.
    #[must_use]
    pub const fn level(self) -> Level {
        match self {
            Self::Trace => Level::TRACE,
            Self::Debug => Level::DEBUG,
            Self::Info | Self::Notice => Level::INFO,
            Self::Warn => Level::WARN,
            Self::Error | Self::Alert => Level::ERROR,
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
