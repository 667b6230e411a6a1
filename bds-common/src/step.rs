use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Restricts a search to post ids inside an inclusive range. `None` leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdRange {
    pub low: Option<u64>,
    pub high: Option<u64>,
}

impl IdRange {
    pub const UNBOUNDED: Self = Self {
        low: None,
        high: None,
    };

    #[inline]
    pub const fn new(low: u64, high: u64) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
        }
    }

    #[inline]
    pub const fn starting_at(low: u64) -> Self {
        Self {
            low: Some(low),
            high: None,
        }
    }

    #[inline]
    pub const fn up_to(high: u64) -> Self {
        Self {
            low: None,
            high: Some(high),
        }
    }
}

/// One bounded sub-search. Both `low` and `high` are inclusive post ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchStep {
    pub low: u64,
    pub high: u64,
}

impl SearchStep {
    #[inline]
    pub const fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    #[inline]
    pub const fn range(&self) -> IdRange {
        IdRange::new(self.low, self.high)
    }

    /// Whether this step starts right after `previous` ends, leaving no gap and no overlap.
    #[inline]
    pub fn follows(&self, previous: &Self) -> bool {
        previous.high.checked_add(1) == Some(self.low)
    }
}

impl Display for SearchStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.low, self.high)
    }
}
