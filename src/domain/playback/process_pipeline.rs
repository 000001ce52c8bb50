//! Step-by-step reveal of the semantic search process diagram.
//!
//! One step becomes active per interval. After the last step is active the
//! next tick marks the pipeline finished and the state freezes.

use serde::{Deserialize, Serialize};

pub const DEFAULT_STEP_INTERVAL_MS: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineStep {
    pub title: &'static str,
    pub description: &'static str,
}

pub const SEMANTIC_SEARCH_STEPS: [PipelineStep; 7] = [
    PipelineStep {
        title: "User Query",
        description: "Input search query",
    },
    PipelineStep {
        title: "Preprocessing",
        description: "Tokenize and clean",
    },
    PipelineStep {
        title: "Embedding",
        description: "Generate vector",
    },
    PipelineStep {
        title: "Indexing",
        description: "Store embeddings",
    },
    PipelineStep {
        title: "Retrieval",
        description: "Find matches",
    },
    PipelineStep {
        title: "Ranking",
        description: "Sort by relevance",
    },
    PipelineStep {
        title: "Results",
        description: "Present to user",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessPipeline {
    /// Index of the last revealed step; `None` before the first tick.
    pub active_step: Option<usize>,
    pub finished: bool,
    pub step_count: usize,
    pub interval_ms: u64,
    pub elapsed_ms: u64,
}

impl Default for ProcessPipeline {
    fn default() -> Self {
        Self::new(SEMANTIC_SEARCH_STEPS.len(), DEFAULT_STEP_INTERVAL_MS)
    }
}

impl ProcessPipeline {
    pub fn new(step_count: usize, interval_ms: u64) -> Self {
        Self {
            active_step: None,
            finished: step_count == 0,
            step_count,
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
        }
    }

    fn tick(mut self) -> Self {
        match self.active_step {
            None => self.active_step = Some(0),
            Some(step) if step + 1 < self.step_count => self.active_step = Some(step + 1),
            Some(_) => self.finished = true,
        }
        self
    }

    /// State after `delta_ms` more milliseconds.
    pub fn advance(&self, delta_ms: u64) -> Self {
        if self.finished {
            return *self;
        }

        let mut next = *self;
        let total = self.elapsed_ms.saturating_add(delta_ms);
        let ticks = total / self.interval_ms;
        next.elapsed_ms = total % self.interval_ms;

        for _ in 0..ticks {
            next = next.tick();
            if next.finished {
                next.elapsed_ms = 0;
                break;
            }
        }
        next
    }

    pub fn is_active(&self, step: usize) -> bool {
        self.active_step.is_some_and(|active| active >= step)
    }

    /// Steps revealed so far.
    pub fn revealed(&self) -> usize {
        self.active_step.map_or(0, |active| active + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_nothing_active() {
        let pipeline = ProcessPipeline::default();
        assert_eq!(pipeline.active_step, None);
        assert!(!pipeline.is_active(0));
        assert_eq!(pipeline.revealed(), 0);
    }

    #[test]
    fn test_reveals_one_step_per_interval() {
        let pipeline = ProcessPipeline::default().advance(1_000);
        assert_eq!(pipeline.active_step, Some(0));
        let pipeline = pipeline.advance(2_500);
        assert_eq!(pipeline.active_step, Some(2));
        assert!(pipeline.is_active(1));
        assert!(!pipeline.is_active(3));
        assert_eq!(pipeline.elapsed_ms, 500);
    }

    #[test]
    fn test_finishes_after_last_step() {
        let pipeline = ProcessPipeline::default().advance(7_000);
        assert_eq!(pipeline.active_step, Some(6));
        assert!(!pipeline.finished);

        let pipeline = pipeline.advance(1_000);
        assert!(pipeline.finished);
        assert_eq!(pipeline.revealed(), SEMANTIC_SEARCH_STEPS.len());
        assert_eq!(pipeline.advance(60_000), pipeline);
    }

    #[test]
    fn test_huge_delta_finishes_without_overflow() {
        let pipeline = ProcessPipeline::default().advance(500).advance(u64::MAX);
        assert!(pipeline.finished);
        assert_eq!(pipeline.elapsed_ms, 0);
    }
}
