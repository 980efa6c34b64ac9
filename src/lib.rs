//! Gesture Control - hand landmarks in, actions and mouse events out.
//!
//! This is the main library crate. It turns per-frame hand landmarks into
//! either debounced gesture actions (k-NN classification over recorded
//! samples) or a smoothed cursor with pinch clicks.

pub mod actions;
pub mod capture;
pub mod classifier;
pub mod clock;
pub mod commands;
pub mod config;
pub mod pipeline;
pub mod processing;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use actions::ActionMapping;
pub use classifier::{ClassificationResult, Classifier, DatasetStore, JsonFileStore, MemoryStore};
pub use clock::{Clock, ManualClock, SystemClock};
pub use commands::{Command, CommandSink};
pub use config::EngineConfig;
pub use pipeline::{run_pipeline, GestureEngine, Mode};

/// Initialize tracing/logging to stderr
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gesture_control_lib=info,gesture_control=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Gesture Control v{}", env!("CARGO_PKG_VERSION"));
}
