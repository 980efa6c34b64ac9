use serde::{Deserialize, Serialize};

/// Number of points in one tracked hand frame
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

/// One tracked hand point in normalized image space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Planar distance to another landmark, ignoring depth
    pub fn distance_2d(&self, other: &Landmark) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Returns true when the frame carries every anatomical point
pub fn is_complete(frame: &[Landmark]) -> bool {
    frame.len() >= LANDMARK_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_z_defaults_to_zero() {
        let lm: Landmark = serde_json::from_str(r#"{"x":0.25,"y":0.5}"#).unwrap();
        assert_eq!(lm, Landmark::new(0.25, 0.5, 0.0));
    }

    #[test]
    fn test_distance_ignores_depth() {
        let a = Landmark::new(0.0, 0.0, 5.0);
        let b = Landmark::new(0.3, 0.4, -5.0);
        assert!((a.distance_2d(&b) - 0.5).abs() < 1e-12);
    }
}
