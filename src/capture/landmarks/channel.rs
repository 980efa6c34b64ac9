//! Serial frame queue between capture and the pipeline
//!
//! Capture and inference may run on any number of threads, but frames must
//! reach the engine one at a time and in order. Producers hold a cloneable
//! `FrameSender`; the pipeline drains the single `QueuedLandmarkSource`.

use crate::capture::landmarks::types::Landmark;
use crate::pipeline::engine::Mode;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Default queue depth
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Input to the pipeline, in submission order
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    /// One video frame; `None` when no hand was detected
    Frame {
        landmarks: Option<Vec<Landmark>>,
        /// Recorded capture time, overriding the engine clock
        at_ms: Option<f64>,
    },
    SetMode(Mode),
    Train {
        label: String,
        landmarks: Vec<Landmark>,
    },
    SetScreenSize {
        width: u32,
        height: u32,
    },
}

impl FrameEvent {
    pub fn frame(landmarks: Option<Vec<Landmark>>) -> Self {
        FrameEvent::Frame {
            landmarks,
            at_ms: None,
        }
    }
}

/// Ordered supplier of frame events
#[async_trait]
pub trait LandmarkSource: Send {
    /// Next event, or `None` once the stream has ended
    async fn next_frame(&mut self) -> Option<FrameEvent>;
}

/// Producer half of the frame queue
#[derive(Debug, Clone)]
pub struct FrameSender {
    tx: mpsc::Sender<FrameEvent>,
}

impl FrameSender {
    pub async fn send(&self, event: FrameEvent) -> bool {
        self.tx.send(event).await.is_ok()
    }

    /// Submit from a non-async capture thread
    pub fn blocking_send(&self, event: FrameEvent) -> bool {
        self.tx.blocking_send(event).is_ok()
    }

    /// Submit without waiting; false if the queue is full or closed
    pub fn try_send(&self, event: FrameEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::debug!("Frame queue full, dropping event");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }
}

/// Consumer half of the frame queue
#[derive(Debug)]
pub struct QueuedLandmarkSource {
    rx: mpsc::Receiver<FrameEvent>,
}

/// Create a bounded frame queue
pub fn frame_queue(capacity: usize) -> (FrameSender, QueuedLandmarkSource) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (FrameSender { tx }, QueuedLandmarkSource { rx })
}

#[async_trait]
impl LandmarkSource for QueuedLandmarkSource {
    async fn next_frame(&mut self) -> Option<FrameEvent> {
        self.rx.recv().await
    }
}

/// Replays a fixed list of events
#[derive(Debug, Default)]
pub struct VecLandmarkSource {
    events: std::collections::VecDeque<FrameEvent>,
}

impl VecLandmarkSource {
    pub fn new(events: Vec<FrameEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

#[async_trait]
impl LandmarkSource for VecLandmarkSource {
    async fn next_frame(&mut self) -> Option<FrameEvent> {
        self.events.pop_front()
    }
}
