use crate::domain::playback::{PipelineStep, ProcessPipeline, SEMANTIC_SEARCH_STEPS};
use serde::Serialize;

/// Snapshot of the process diagram at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineFrame {
    pub time_ms: u64,
    pub active: Vec<PipelineStep>,
    pub finished: bool,
}

/// Frames emitted every `tick_ms` until the pipeline finishes or `max_ms` passes.
pub fn timeline(step_interval_ms: u64, tick_ms: u64, max_ms: u64) -> Vec<PipelineFrame> {
    let tick_ms = tick_ms.max(1);
    let mut pipeline = ProcessPipeline::new(SEMANTIC_SEARCH_STEPS.len(), step_interval_ms);
    let mut frames = vec![snapshot(&pipeline, 0)];

    let mut time_ms = 0;
    while !pipeline.finished && time_ms + tick_ms <= max_ms {
        time_ms += tick_ms;
        let next = pipeline.advance(tick_ms);
        if next.revealed() != pipeline.revealed() || next.finished != pipeline.finished {
            frames.push(snapshot(&next, time_ms));
        }
        pipeline = next;
    }
    frames
}

fn snapshot(pipeline: &ProcessPipeline, time_ms: u64) -> PipelineFrame {
    PipelineFrame {
        time_ms,
        active: SEMANTIC_SEARCH_STEPS[..pipeline.revealed()].to_vec(),
        finished: pipeline.finished,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_reveals_all_steps() {
        let frames = timeline(1_000, 1_000, 60_000);
        // initial, seven reveals, final animation
        assert_eq!(frames.len(), 9);
        assert!(frames[0].active.is_empty());
        assert_eq!(frames[1].active[0].title, "User Query");
        assert_eq!(frames[7].active.len(), 7);
        assert!(!frames[7].finished);
        assert!(frames[8].finished);
        assert_eq!(frames[8].time_ms, 8_000);
    }

    #[test]
    fn test_timeline_stops_at_max() {
        let frames = timeline(1_000, 500, 2_000);
        assert_eq!(frames.last().unwrap().active.len(), 2);
    }
}
