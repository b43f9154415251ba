//! Validity windows.

use serde::{Deserialize, Serialize};

/// An optional validity window in milliseconds since epoch.
///
/// The lower bound is inclusive, the upper bound exclusive: at exactly
/// `valid_until` the window is already closed, so a revocation instant never
/// overlaps with validity. Both bounds unset means always valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timespan {
    /// Earliest instant (inclusive) at which the window is open.
    pub valid_from: Option<u64>,

    /// Instant (exclusive) at which the window closes.
    pub valid_until: Option<u64>,
}

impl Timespan {
    /// A window with no constraints.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            valid_from: None,
            valid_until: None,
        }
    }

    /// Creates a window from optional bounds.
    #[must_use]
    pub const fn new(valid_from: Option<u64>, valid_until: Option<u64>) -> Self {
        Self {
            valid_from,
            valid_until,
        }
    }

    /// Returns `true` if `now_ms` falls within the window.
    #[must_use]
    pub fn contains(&self, now_ms: u64) -> bool {
        if let Some(from) = self.valid_from {
            if now_ms < from {
                return false;
            }
        }
        if let Some(until) = self.valid_until {
            if now_ms >= until {
                return false;
            }
        }
        true
    }
}
