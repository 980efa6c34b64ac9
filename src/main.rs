//! Replays recorded landmark frames through the gesture pipeline.
//!
//! Each input line is one record:
//!     {"timeMs": 33.3, "landmarks": [{"x":..,"y":..,"z":..}, ...] | null,
//!      "train": "fist", "mode": "mouse"}
//! Commands are written to stdout as JSON lines; logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use gesture_control_lib::capture::landmarks::channel::DEFAULT_QUEUE_CAPACITY;
use gesture_control_lib::capture::{frame_queue, FrameEvent, FrameSender, Landmark};
use gesture_control_lib::commands::{JsonLinesSink, LineFormat};
use gesture_control_lib::{run_pipeline, EngineConfig, GestureEngine, JsonFileStore, Mode, SystemClock};
use serde::Deserialize;
use std::io::BufRead;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gesture-control", about = "Replay recorded hand landmarks through the gesture pipeline")]
struct Args {
    /// JSON-lines file of recorded frames
    frames: PathBuf,

    /// Engine config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the gesture dataset
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Starting mode: gesture or mouse
    #[arg(long, default_value = "gesture")]
    mode: Mode,

    /// Emit execution backend messages instead of commands
    #[arg(long)]
    wire: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrameRecord {
    time_ms: f64,
    #[serde(default)]
    landmarks: Option<Vec<Landmark>>,
    #[serde(default)]
    train: Option<String>,
    #[serde(default)]
    mode: Option<Mode>,
}

/// Events for one record, in queue order
fn record_events(record: FrameRecord) -> Vec<FrameEvent> {
    let mut events = Vec::with_capacity(2);
    if let Some(mode) = record.mode {
        events.push(FrameEvent::SetMode(mode));
    }
    events.push(match (record.train, record.landmarks) {
        (Some(label), Some(landmarks)) => FrameEvent::Train { label, landmarks },
        // a training record without a hand replays as a no-hand frame
        (_, landmarks) => FrameEvent::Frame {
            landmarks,
            at_ms: Some(record.time_ms),
        },
    });
    events
}

/// Read records on a blocking thread and queue them in file order
fn spawn_reader(path: PathBuf, tx: FrameSender) -> tokio::task::JoinHandle<Result<usize>> {
    tokio::task::spawn_blocking(move || {
        let file = std::fs::File::open(&path)
            .with_context(|| format!("Failed to open frames file {}", path.display()))?;
        let mut records = 0;

        for (line_no, line) in std::io::BufReader::new(file).lines().enumerate() {
            let line = line.context("Failed to read frames file")?;
            if line.trim().is_empty() {
                continue;
            }
            let record: FrameRecord = serde_json::from_str(&line)
                .with_context(|| format!("Invalid frame record on line {}", line_no + 1))?;
            records += 1;

            for event in record_events(record) {
                if !tx.blocking_send(event) {
                    return Ok(records);
                }
            }
        }

        Ok(records)
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    gesture_control_lib::init_tracing();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let store = JsonFileStore::new(&args.data_dir);
    tracing::info!("Using gesture dataset at {}", store.path().display());

    let mut engine = GestureEngine::new(config, store, SystemClock::new());
    engine.set_mode(args.mode);

    let format = if args.wire { LineFormat::Backend } else { LineFormat::Command };
    let mut sink = JsonLinesSink::with_format(std::io::stdout(), format);

    let (tx, mut source) = frame_queue(DEFAULT_QUEUE_CAPACITY);
    let reader = spawn_reader(args.frames.clone(), tx);

    let stats = run_pipeline(&mut source, &mut engine, &mut sink)
        .await
        .context("Pipeline failed")?;
    let records = reader.await.context("Frame reader panicked")??;

    tracing::info!(
        "Replayed {} records ({} frames, {} commands); dataset has {} gestures",
        records,
        stats.frames,
        stats.commands,
        engine.classifier().gesture_names().len()
    );
    Ok(())
}
