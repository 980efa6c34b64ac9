//! Command sinks
//!
//! Commands are fire-and-forget: a sink accepts them in order and nothing
//! is acknowledged back to the pipeline.

use crate::commands::types::Command;
use crate::commands::wire::to_backend_message;
use crate::pipeline::error::{PipelineError, PipelineResult};
use parking_lot::Mutex as ParkingMutex;
use std::io::Write;
use std::sync::Arc;

/// Consumer of emitted commands
pub trait CommandSink: Send {
    fn send(&mut self, command: Command) -> PipelineResult<()>;
}

/// Output encoding for `JsonLinesSink`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFormat {
    /// `Command` as tagged JSON
    #[default]
    Command,
    /// Execution backend messages
    Backend,
}

/// Writes one JSON object per line
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
    format: LineFormat,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self::with_format(writer, LineFormat::Command)
    }

    pub fn with_format(writer: W, format: LineFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> CommandSink for JsonLinesSink<W> {
    fn send(&mut self, command: Command) -> PipelineResult<()> {
        match self.format {
            LineFormat::Command => serde_json::to_writer(&mut self.writer, &command)?,
            LineFormat::Backend => {
                serde_json::to_writer(&mut self.writer, &to_backend_message(&command))?
            }
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps commands in memory; clones share the buffer
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    commands: Arc<ParkingMutex<Vec<Command>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().clone()
    }

    pub fn take(&self) -> Vec<Command> {
        std::mem::take(&mut *self.commands.lock())
    }
}

impl CommandSink for CollectingSink {
    fn send(&mut self, command: Command) -> PipelineResult<()> {
        self.commands.lock().push(command);
        Ok(())
    }
}

/// Forwards commands into a tokio channel
pub struct ChannelSink {
    tx: tokio::sync::mpsc::UnboundedSender<Command>,
}

impl ChannelSink {
    pub fn new(tx: tokio::sync::mpsc::UnboundedSender<Command>) -> Self {
        Self { tx }
    }
}

impl CommandSink for ChannelSink {
    fn send(&mut self, command: Command) -> PipelineResult<()> {
        self.tx.send(command).map_err(|_| PipelineError::SinkClosed)
    }
}
