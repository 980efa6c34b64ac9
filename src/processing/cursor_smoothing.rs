//! Fingertip-to-cursor mapping
//!
//! Turns the pointing fingertip position from a front-facing camera into
//! a smoothed absolute screen position. The x axis is mirrored, a limited
//! "active zone" of the camera image is stretched over the whole screen,
//! and an exponential moving average removes tracking jitter.

use crate::capture::landmarks::types::Landmark;
use serde::{Deserialize, Serialize};

/// Region of normalized camera space mapped onto the full screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveZone {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for ActiveZone {
    fn default() -> Self {
        Self {
            x_min: 0.10,
            x_max: 0.90,
            y_min: 0.12,
            y_max: 0.65,
        }
    }
}

impl ActiveZone {
    /// Stretch a camera-space point over [0,1] x [0,1], clamped
    pub fn remap(&self, x: f64, y: f64) -> (f64, f64) {
        let nx = (x - self.x_min) / (self.x_max - self.x_min);
        let ny = (y - self.y_min) / (self.y_max - self.y_min);
        (nx.clamp(0.0, 1.0), ny.clamp(0.0, 1.0))
    }
}

/// Output screen size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Cursor mapping configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CursorConfig {
    pub active_zone: ActiveZone,
    /// Weight of the newest sample in the moving average
    pub smoothing: f64,
    pub screen: ScreenSize,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            active_zone: ActiveZone::default(),
            smoothing: 0.5,
            screen: ScreenSize::default(),
        }
    }
}

/// Smoothed cursor position in normalized and pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorPosition {
    pub x: f64,
    pub y: f64,
    pub pixel_x: i32,
    pub pixel_y: i32,
}

/// Per-session smoothing state
#[derive(Debug, Clone)]
pub struct CursorMapper {
    config: CursorConfig,
    smooth_x: f64,
    smooth_y: f64,
    initialized: bool,
}

impl CursorMapper {
    pub fn new(config: CursorConfig) -> Self {
        Self {
            config,
            smooth_x: 0.5,
            smooth_y: 0.5,
            initialized: false,
        }
    }

    /// Feed the pointing fingertip for one frame
    ///
    /// The first frame after construction or `reset` snaps to the raw
    /// position; later frames blend `alpha * raw + (1 - alpha) * previous`.
    pub fn update(&mut self, fingertip: &Landmark) -> CursorPosition {
        let mirrored_x = 1.0 - fingertip.x;
        let (raw_x, raw_y) = self.config.active_zone.remap(mirrored_x, fingertip.y);

        if self.initialized {
            let alpha = self.config.smoothing;
            self.smooth_x = alpha * raw_x + (1.0 - alpha) * self.smooth_x;
            self.smooth_y = alpha * raw_y + (1.0 - alpha) * self.smooth_y;
        } else {
            self.smooth_x = raw_x;
            self.smooth_y = raw_y;
            self.initialized = true;
        }

        self.position()
    }

    /// Current smoothed position without consuming a frame
    pub fn position(&self) -> CursorPosition {
        let (pixel_x, pixel_y) = self.to_pixels(self.smooth_x, self.smooth_y);
        CursorPosition {
            x: self.smooth_x,
            y: self.smooth_y,
            pixel_x,
            pixel_y,
        }
    }

    fn to_pixels(&self, x: f64, y: f64) -> (i32, i32) {
        let screen = self.config.screen;
        (
            (x * screen.width as f64).round() as i32,
            (y * screen.height as f64).round() as i32,
        )
    }

    /// Forget smoothing history and return to the screen center
    pub fn reset(&mut self) {
        self.smooth_x = 0.5;
        self.smooth_y = 0.5;
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.config.screen = ScreenSize { width, height };
    }
}
