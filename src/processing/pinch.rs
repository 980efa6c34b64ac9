//! Pinch-driven mouse clicks
//!
//! Thumb-to-index pinches produce left clicks, thumb-to-middle pinches
//! produce right clicks. Each channel has its own hysteresis flag and
//! click cooldown. Two accepted left clicks inside the double-click window
//! become a single double click.

use crate::capture::landmarks::types::Landmark;
use crate::commands::types::Command;
use crate::processing::cursor_smoothing::CursorPosition;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Pinch thresholds and click timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PinchConfig {
    /// Fingertip distance that starts a pinch
    pub close_threshold: f64,
    /// Fingertip distance that ends a pinch
    pub release_threshold: f64,
    pub click_cooldown_ms: f64,
    pub double_click_window_ms: f64,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            close_threshold: 0.045,
            release_threshold: 0.065,
            click_cooldown_ms: 300.0,
            double_click_window_ms: 400.0,
        }
    }
}

/// Hysteresis and cooldown state for one click channel
#[derive(Debug, Clone, Default)]
struct PinchChannel {
    pinching: bool,
    last_click_ms: Option<f64>,
}

impl PinchChannel {
    /// Advance with this frame's distance; true when a click is accepted
    fn update(&mut self, distance: f64, now_ms: f64, config: &PinchConfig) -> bool {
        if self.pinching {
            if distance > config.release_threshold {
                self.pinching = false;
            }
            return false;
        }

        if distance >= config.close_threshold {
            return false;
        }

        self.pinching = true;
        let cooled_down = self
            .last_click_ms
            .map_or(true, |last| now_ms - last >= config.click_cooldown_ms);
        if cooled_down {
            self.last_click_ms = Some(now_ms);
        }
        cooled_down
    }
}

/// Which buttons are currently held by a pinch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PinchState {
    pub left: bool,
    pub right: bool,
}

pub struct PinchEventDetector {
    config: PinchConfig,
    left: PinchChannel,
    right: PinchChannel,
    left_clicks: VecDeque<f64>,
}

impl PinchEventDetector {
    pub fn new(config: PinchConfig) -> Self {
        Self {
            config,
            left: PinchChannel::default(),
            right: PinchChannel::default(),
            left_clicks: VecDeque::new(),
        }
    }

    /// Commands for one frame: always a move, then any clicks
    pub fn update(
        &mut self,
        thumb: &Landmark,
        index: &Landmark,
        middle: &Landmark,
        cursor: &CursorPosition,
        now_ms: f64,
    ) -> Vec<Command> {
        let (x, y) = (cursor.pixel_x, cursor.pixel_y);
        let mut commands = vec![Command::Move { x, y }];

        let left_distance = thumb.distance_2d(index);
        if self.left.update(left_distance, now_ms, &self.config) {
            if self.register_left_click(now_ms) {
                tracing::debug!("Double click at ({}, {})", x, y);
                commands.push(Command::DoubleClick { x, y });
            } else {
                tracing::debug!("Left click at ({}, {})", x, y);
                commands.push(Command::LeftClick { x, y });
            }
        }

        let right_distance = thumb.distance_2d(middle);
        if self.right.update(right_distance, now_ms, &self.config) {
            tracing::debug!("Right click at ({}, {})", x, y);
            commands.push(Command::RightClick { x, y });
        }

        commands
    }

    /// Track an accepted left click; true when it completes a double click
    fn register_left_click(&mut self, now_ms: f64) -> bool {
        self.left_clicks.push_back(now_ms);
        let window = self.config.double_click_window_ms;
        while let Some(&oldest) = self.left_clicks.front() {
            if now_ms - oldest < window {
                break;
            }
            self.left_clicks.pop_front();
        }

        if self.left_clicks.len() >= 2 {
            self.left_clicks.clear();
            true
        } else {
            false
        }
    }

    pub fn state(&self) -> PinchState {
        PinchState {
            left: self.left.pinching,
            right: self.right.pinching,
        }
    }

    /// Drop hysteresis, cooldown and double-click history
    pub fn reset(&mut self) {
        self.left = PinchChannel::default();
        self.right = PinchChannel::default();
        self.left_clicks.clear();
    }
}
