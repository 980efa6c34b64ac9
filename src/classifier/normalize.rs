//! Pose normalization for the k-NN classifier
//!
//! Turns a raw landmark frame into a translation- and scale-invariant
//! feature vector. The same routine runs when capturing training samples
//! and when matching live frames, so the operation order here is fixed.

use crate::capture::landmarks::types::{Landmark, LANDMARK_COUNT, MIDDLE_MCP, WRIST};
use crate::classifier::dataset::{FeatureVector, FEATURE_LEN};
use thiserror::Error;

/// Smallest palm size accepted as a divisor
pub const MIN_PALM_SCALE: f64 = 0.001;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("Incomplete frame: expected 21 landmarks, got {got}")]
    IncompleteFrame { got: usize },

    #[error("Non-finite coordinate in landmark {index}")]
    NonFinite { index: usize },
}

/// Normalize a landmark frame into a 42-value feature vector
///
/// Every point is centered on the wrist and divided by the wrist to
/// middle-finger-base distance. Depth is discarded. Extra landmarks past
/// the first 21 are ignored. A NaN or infinite result is rejected so it can
/// never reach the stored dataset.
pub fn normalize(frame: &[Landmark]) -> Result<FeatureVector, NormalizeError> {
    if frame.len() < LANDMARK_COUNT {
        return Err(NormalizeError::IncompleteFrame { got: frame.len() });
    }

    let wrist = frame[WRIST];
    let middle_mcp = frame[MIDDLE_MCP];

    let scale = palm_scale(&wrist, &middle_mcp);

    let mut values = Vec::with_capacity(FEATURE_LEN);
    for (index, lm) in frame[..LANDMARK_COUNT].iter().enumerate() {
        let x = (lm.x - wrist.x) / scale;
        let y = (lm.y - wrist.y) / scale;
        if !(x.is_finite() && y.is_finite()) {
            return Err(NormalizeError::NonFinite { index });
        }
        values.push(x);
        values.push(y);
    }

    Ok(FeatureVector::from_normalized(values))
}

fn palm_scale(wrist: &Landmark, middle_mcp: &Landmark) -> f64 {
    let dx = middle_mcp.x - wrist.x;
    let dy = middle_mcp.y - wrist.y;
    let scale = (dx * dx + dy * dy).sqrt();
    if scale < MIN_PALM_SCALE {
        MIN_PALM_SCALE
    } else {
        scale
    }
}

/// Euclidean distance between two feature vectors
pub fn euclidean_distance(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let mut sum = 0.0;
    for (x, y) in a.values().iter().zip(b.values()) {
        let d = x - y;
        sum += d * d;
    }
    sum.sqrt()
}
