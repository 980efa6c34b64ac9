//! Frame-by-frame dispatch between the gesture and mouse pipelines
//!
//! Exactly one pipeline is active at a time. Gesture mode runs the
//! classifier and the debounce gate; mouse mode runs the cursor mapper and
//! the pinch detector. Switching modes resets every timing component.

use crate::actions::ActionMapping;
use crate::capture::landmarks::types::{is_complete, Landmark, INDEX_TIP, MIDDLE_TIP, THUMB_TIP};
use crate::classifier::knn::{ClassificationResult, Classifier};
use crate::classifier::store::DatasetStore;
use crate::clock::Clock;
use crate::commands::types::Command;
use crate::config::EngineConfig;
use crate::processing::cursor_smoothing::CursorMapper;
use crate::processing::gesture_gate::GestureEventGate;
use crate::processing::pinch::PinchEventDetector;
use serde::{Deserialize, Serialize};

/// Active pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Gesture,
    Mouse,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Gesture => write!(f, "gesture"),
            Mode::Mouse => write!(f, "mouse"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gesture" => Ok(Mode::Gesture),
            "mouse" => Ok(Mode::Mouse),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}

pub struct GestureEngine<S: DatasetStore, C: Clock> {
    mode: Mode,
    clock: C,
    classifier: Classifier<S>,
    gate: GestureEventGate,
    cursor: CursorMapper,
    pinch: PinchEventDetector,
    last_result: Option<ClassificationResult>,
}

impl<S: DatasetStore, C: Clock> GestureEngine<S, C> {
    pub fn new(config: EngineConfig, store: S, clock: C) -> Self {
        config.actions.warn_unknown();
        Self {
            mode: Mode::default(),
            clock,
            classifier: Classifier::with_k(store, config.classifier.k),
            gate: GestureEventGate::new(config.gate, config.actions),
            cursor: CursorMapper::new(config.cursor),
            pinch: PinchEventDetector::new(config.pinch),
            last_result: None,
        }
    }

    /// Process a frame at the current clock time
    pub fn process_frame(&mut self, frame: Option<&[Landmark]>) -> Vec<Command> {
        let now_ms = self.clock.now_ms();
        self.process_frame_at(frame, now_ms)
    }

    /// Process a frame at an explicit timestamp
    pub fn process_frame_at(&mut self, frame: Option<&[Landmark]>, now_ms: f64) -> Vec<Command> {
        let frame = frame.filter(|f| is_complete(f));
        match self.mode {
            Mode::Gesture => self.process_gesture(frame, now_ms),
            Mode::Mouse => self.process_mouse(frame, now_ms),
        }
    }

    fn process_gesture(&mut self, frame: Option<&[Landmark]>, now_ms: f64) -> Vec<Command> {
        self.last_result = frame.and_then(|f| self.classifier.classify(f));
        self.gate
            .update(self.last_result.as_ref(), now_ms)
            .into_iter()
            .collect()
    }

    fn process_mouse(&mut self, frame: Option<&[Landmark]>, now_ms: f64) -> Vec<Command> {
        let Some(frame) = frame else {
            return Vec::new();
        };
        let position = self.cursor.update(&frame[INDEX_TIP]);
        self.pinch.update(
            &frame[THUMB_TIP],
            &frame[INDEX_TIP],
            &frame[MIDDLE_TIP],
            &position,
            now_ms,
        )
    }

    /// Switch pipelines, resetting all smoothing and timing state
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        tracing::info!("Switching mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.cursor.reset();
        self.pinch.reset();
        self.gate.reset();
        self.last_result = None;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Record a training sample for `label`
    pub fn train(&mut self, label: &str, frame: &[Landmark]) -> bool {
        self.classifier.add_sample(label, frame)
    }

    pub fn classifier(&self) -> &Classifier<S> {
        &self.classifier
    }

    pub fn classifier_mut(&mut self) -> &mut Classifier<S> {
        &mut self.classifier
    }

    /// Classification of the last gesture-mode frame
    pub fn last_result(&self) -> Option<&ClassificationResult> {
        self.last_result.as_ref()
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        tracing::debug!("Screen size set to {}x{}", width, height);
        self.cursor.set_screen_size(width, height);
    }

    pub fn set_action_mapping(&mut self, actions: ActionMapping) {
        actions.warn_unknown();
        self.gate.set_actions(actions);
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::landmarks::fixtures::{fist_hand, hand_with_tips, sample_hand};
    use crate::classifier::store::MemoryStore;
    use crate::clock::ManualClock;
    use crate::processing::gesture_gate::GateState;

    fn engine() -> GestureEngine<MemoryStore, ManualClock> {
        let config = EngineConfig {
            actions: ActionMapping::new().with("fist", "play_pause"),
            ..EngineConfig::default()
        };
        GestureEngine::new(config, MemoryStore::new(), ManualClock::new(0.0))
    }

    fn trained_engine() -> GestureEngine<MemoryStore, ManualClock> {
        let mut e = engine();
        for _ in 0..10 {
            assert!(e.train("fist", &fist_hand()));
        }
        for _ in 0..10 {
            assert!(e.train("open", &sample_hand()));
        }
        e
    }

    #[test]
    fn test_gesture_mode_triggers_after_debounce() {
        let mut e = trained_engine();
        let fist = fist_hand();

        let mut fired = Vec::new();
        for step in 0..8 {
            e.clock().set(step as f64 * 30.0);
            fired.extend(e.process_frame(Some(&fist)));
        }

        assert_eq!(
            fired,
            vec![Command::Trigger {
                gesture: "fist".to_string(),
                action: "play_pause".to_string(),
                confidence: 1.0,
            }]
        );
        assert_eq!(e.last_result().unwrap().gesture_name, "fist");
    }

    #[test]
    fn test_unmapped_gesture_is_silent() {
        let mut e = trained_engine();
        let open = sample_hand();
        for step in 0..20 {
            assert!(e.process_frame_at(Some(&open), step as f64 * 30.0).is_empty());
        }
        assert_eq!(e.last_result().unwrap().gesture_name, "open");
    }

    #[test]
    fn test_missing_hand_resets_hold() {
        let mut e = trained_engine();
        let fist = fist_hand();
        e.process_frame_at(Some(&fist), 0.0);
        e.process_frame_at(None, 100.0);
        assert_eq!(e.gate.state(100.0), GateState::Idle);
        assert!(e.process_frame_at(Some(&fist), 160.0).is_empty());
        assert!(e.process_frame_at(Some(&fist[..5]), 200.0).is_empty());
    }

    #[test]
    fn test_removed_gesture_stops_triggering() {
        let mut e = trained_engine();
        e.classifier_mut().remove_gesture("fist");
        assert_eq!(e.classifier().gesture_names(), vec!["open".to_string()]);

        let fist = fist_hand();
        for step in 0..10 {
            assert!(e.process_frame_at(Some(&fist), step as f64 * 30.0).is_empty());
        }
        assert_eq!(e.last_result().unwrap().gesture_name, "open");
    }

    #[test]
    fn test_untrained_gesture_mode_emits_nothing() {
        let mut e = engine();
        for step in 0..10 {
            assert!(e.process_frame_at(Some(&fist_hand()), step as f64 * 50.0).is_empty());
        }
        assert!(e.last_result().is_none());
    }

    #[test]
    fn test_mouse_mode_moves_and_clicks() {
        let mut e = engine();
        e.set_mode(Mode::Mouse);

        let open = hand_with_tips((0.40, 0.40), (0.50, 0.30), (0.60, 0.30));
        let cmds = e.process_frame_at(Some(&open), 0.0);
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].kind(), "move");

        let pinched = hand_with_tips((0.49, 0.30), (0.50, 0.30), (0.60, 0.30));
        let cmds = e.process_frame_at(Some(&pinched), 30.0);
        let kinds: Vec<&str> = cmds.iter().map(Command::kind).collect();
        assert_eq!(kinds, vec!["move", "left_click"]);
    }

    #[test]
    fn test_mouse_mode_skips_incomplete_frames() {
        let mut e = engine();
        e.set_mode(Mode::Mouse);
        assert!(e.process_frame_at(None, 0.0).is_empty());
        assert!(e.process_frame_at(Some(&sample_hand()[..20]), 0.0).is_empty());
    }

    #[test]
    fn test_mode_switch_resets_cursor() {
        let mut e = engine();
        e.set_mode(Mode::Mouse);
        e.process_frame_at(Some(&sample_hand()), 0.0);
        assert!(e.cursor.is_initialized());

        e.set_mode(Mode::Gesture);
        assert!(!e.cursor.is_initialized());
        assert_eq!(e.mode(), Mode::Gesture);
    }

    #[test]
    fn test_screen_size_applies_to_moves() {
        let mut e = engine();
        e.set_mode(Mode::Mouse);
        e.set_screen_size(100, 100);

        // index tip at the zone center maps to the screen center
        let frame = hand_with_tips((0.1, 0.9), (0.5, 0.385), (0.9, 0.9));
        let cmds = e.process_frame_at(Some(&frame), 0.0);
        assert_eq!(cmds[0], Command::Move { x: 50, y: 50 });
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("mouse".parse::<Mode>(), Ok(Mode::Mouse));
        assert_eq!("gesture".parse::<Mode>(), Ok(Mode::Gesture));
        assert!("keyboard".parse::<Mode>().is_err());
        assert_eq!(Mode::Mouse.to_string(), "mouse");
    }
}
