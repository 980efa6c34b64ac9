//! Synthetic hand frames shared by unit tests

use super::types::{Landmark, INDEX_TIP, LANDMARK_COUNT, MIDDLE_TIP, PINKY_TIP, RING_TIP, THUMB_TIP};

/// A loosely open hand around the middle of the image
pub fn sample_hand() -> Vec<Landmark> {
    let mut frame = vec![Landmark::new(0.45, 0.80, 0.0)];
    for i in 1..LANDMARK_COUNT {
        let finger = ((i - 1) / 4) as f64;
        let joint = ((i - 1) % 4) as f64;
        frame.push(Landmark::new(0.36 + 0.045 * finger, 0.72 - 0.05 * joint, 0.0));
    }
    frame
}

/// Fingertips pulled toward the palm
pub fn fist_hand() -> Vec<Landmark> {
    let mut frame = sample_hand();
    for tip in [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP] {
        frame[tip] = Landmark::new(frame[tip].x, 0.62, 0.0);
    }
    frame
}

/// The sample hand with thumb, index and middle tips placed explicitly
pub fn hand_with_tips(thumb: (f64, f64), index: (f64, f64), middle: (f64, f64)) -> Vec<Landmark> {
    let mut frame = sample_hand();
    frame[THUMB_TIP] = Landmark::new(thumb.0, thumb.1, 0.0);
    frame[INDEX_TIP] = Landmark::new(index.0, index.1, 0.0);
    frame[MIDDLE_TIP] = Landmark::new(middle.0, middle.1, 0.0);
    frame
}
