//! Async frame loop
//!
//! Drains a `LandmarkSource` strictly in order, runs each event through the
//! engine, and forwards every resulting command to the sink.

use crate::capture::landmarks::channel::{FrameEvent, LandmarkSource};
use crate::classifier::store::DatasetStore;
use crate::clock::Clock;
use crate::commands::sink::CommandSink;
use crate::pipeline::engine::GestureEngine;
use crate::pipeline::error::PipelineResult;

/// Counters for one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames: usize,
    pub frames_without_hand: usize,
    pub samples_added: usize,
    pub commands: usize,
}

/// Run until the source ends or the sink fails
pub async fn run_pipeline<L, S, C, K>(
    source: &mut L,
    engine: &mut GestureEngine<S, C>,
    sink: &mut K,
) -> PipelineResult<RunStats>
where
    L: LandmarkSource,
    S: DatasetStore,
    C: Clock,
    K: CommandSink,
{
    let mut stats = RunStats::default();

    while let Some(event) = source.next_frame().await {
        match event {
            FrameEvent::Frame { landmarks, at_ms } => {
                stats.frames += 1;
                if landmarks.is_none() {
                    stats.frames_without_hand += 1;
                }
                let frame = landmarks.as_deref();
                let commands = match at_ms {
                    Some(now_ms) => engine.process_frame_at(frame, now_ms),
                    None => engine.process_frame(frame),
                };
                for command in commands {
                    sink.send(command)?;
                    stats.commands += 1;
                }
            }
            FrameEvent::SetMode(mode) => engine.set_mode(mode),
            FrameEvent::Train { label, landmarks } => {
                if engine.train(&label, &landmarks) {
                    stats.samples_added += 1;
                }
            }
            FrameEvent::SetScreenSize { width, height } => engine.set_screen_size(width, height),
        }
    }

    tracing::info!(
        "Pipeline finished (frames={}, no_hand={}, samples={}, commands={})",
        stats.frames,
        stats.frames_without_hand,
        stats.samples_added,
        stats.commands
    );
    Ok(stats)
}
