//! Outbound commands
//!
//! This module contains the events emitted by the gesture and mouse
//! pipelines, the sinks that consume them, and the message format used by
//! the action execution backend.

pub mod sink;
pub mod types;
pub mod wire;

pub use sink::{ChannelSink, CollectingSink, CommandSink, JsonLinesSink, LineFormat};
pub use types::Command;
pub use wire::to_backend_message;
