//! Capture-side inputs
//!
//! Camera access and hand tracking live outside this crate. This module
//! provides the landmark frame types they hand over and the queue that
//! serializes frames into the pipeline.

pub mod landmarks;

pub use landmarks::{frame_queue, FrameEvent, FrameSender, Landmark, LandmarkSource, QueuedLandmarkSource};
