//! Per-frame signal processing
//!
//! This module contains the real-time stages that run after landmark
//! capture: cursor smoothing, pinch click detection, and the debounce gate
//! between the classifier and emitted actions.

pub mod cursor_smoothing;
pub mod gesture_gate;
pub mod pinch;

pub use cursor_smoothing::{ActiveZone, CursorConfig, CursorMapper, CursorPosition, ScreenSize};
pub use gesture_gate::{GateConfig, GateState, GestureEventGate};
pub use pinch::{PinchConfig, PinchEventDetector, PinchState};
