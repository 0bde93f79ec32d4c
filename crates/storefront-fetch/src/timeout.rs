//! Timeout configuration for fetch operations.

use std::time::Duration;

/// Timeout configuration for a fetch operation.
///
/// Both limits are optional. With neither set the client relies on the
/// transport's own failure behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Option<Duration>,
    /// Total operation timeout.
    pub total: Option<Duration>,
}

impl TimeoutConfig {
    /// No timeouts.
    pub fn none() -> Self {
        Self::default()
    }

    /// Create from a single total timeout.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: Some(total / 4),
            total: Some(total),
        }
    }

    /// Create from an optional millisecond value, as found in config files.
    pub fn from_millis(ms: Option<u64>) -> Self {
        match ms {
            Some(ms) if ms > 0 => Self::from_total(Duration::from_millis(ms)),
            _ => Self::none(),
        }
    }

    /// Whether any limit is set.
    pub fn is_bounded(&self) -> bool {
        self.connect.is_some() || self.total.is_some()
    }
}
