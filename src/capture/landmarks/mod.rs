//! Hand landmark input
//!
//! Landmark frames arrive from an external hand tracker, 21 points per
//! hand in a fixed anatomical order. This module defines the frame types
//! and the ordered queue that carries them into the pipeline.

pub mod channel;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use channel::{frame_queue, FrameEvent, FrameSender, LandmarkSource, QueuedLandmarkSource, VecLandmarkSource};
pub use types::{Landmark, LANDMARK_COUNT};
