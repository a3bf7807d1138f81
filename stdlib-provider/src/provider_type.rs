//! Capability slot identifiers.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Tag identifying a capability slot in a [`ProviderRegistry`](crate::ProviderRegistry).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ProviderType {
    /// Structured logging.
    Logger,
    /// Error reporting.
    ErrorReporter,
    /// Metrics emission.
    Metrics,
    /// Blob or document storage.
    Storage,
}

impl ProviderType {
    /// Returns the canonical upper-case name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Logger => "LOGGER",
            Self::ErrorReporter => "ERROR_REPORTER",
            Self::Metrics => "METRICS",
            Self::Storage => "STORAGE",
        }
    }
}

impl Display for ProviderType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
