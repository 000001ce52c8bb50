use crate::domain::statistics::kpi::Quarter;
use serde::{Deserialize, Serialize};

pub const DEFAULT_QUARTER_INTERVAL_MS: u64 = 5_000;

/// Dashboard auto-play: steps to the next quarter every `interval_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterCycle {
    pub quarter: Quarter,
    pub interval_ms: u64,
    /// Time accumulated toward the next step.
    pub elapsed_ms: u64,
}

impl Default for QuarterCycle {
    fn default() -> Self {
        Self::new(DEFAULT_QUARTER_INTERVAL_MS)
    }
}

impl QuarterCycle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            quarter: Quarter::from_index(0),
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
        }
    }

    pub fn starting_at(mut self, quarter: Quarter) -> Self {
        self.quarter = quarter;
        self
    }

    /// State after `delta_ms` more milliseconds.
    pub fn advance(&self, delta_ms: u64) -> Self {
        let total = self.elapsed_ms.saturating_add(delta_ms);
        // Only the position within the year matters.
        let steps = (total / self.interval_ms % Quarter::COUNT as u64) as usize;
        Self {
            quarter: Quarter::from_index(self.quarter.index() + steps),
            interval_ms: self.interval_ms,
            elapsed_ms: total % self.interval_ms,
        }
    }
}
