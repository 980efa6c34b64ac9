//! Debounce and cooldown for classified gestures
//!
//! A gesture must be classified above the confidence threshold for the
//! debounce interval before its mapped action fires. After a trigger the
//! gate stays closed for the cooldown interval, and the hold has to be
//! re-acquired from scratch.

use crate::actions::ActionMapping;
use crate::classifier::knn::ClassificationResult;
use crate::commands::types::Command;
use serde::{Deserialize, Serialize};

/// Gate thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GateConfig {
    pub confidence_threshold: f64,
    pub debounce_ms: f64,
    pub cooldown_ms: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.6,
            debounce_ms: 150.0,
            cooldown_ms: 600.0,
        }
    }
}

/// Observable gate state
#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    Idle,
    Held { gesture: String, since_ms: f64 },
    Cooldown { until_ms: f64 },
}

pub struct GestureEventGate {
    config: GateConfig,
    actions: ActionMapping,
    held_gesture: Option<String>,
    hold_start_ms: f64,
    cooldown_until_ms: Option<f64>,
}

impl GestureEventGate {
    pub fn new(config: GateConfig, actions: ActionMapping) -> Self {
        Self {
            config,
            actions,
            held_gesture: None,
            hold_start_ms: 0.0,
            cooldown_until_ms: None,
        }
    }

    /// Feed one frame's classification; returns a trigger when one fires
    pub fn update(&mut self, result: Option<&ClassificationResult>, now_ms: f64) -> Option<Command> {
        let result = match result {
            Some(r) if r.confidence >= self.config.confidence_threshold => r,
            _ => {
                self.held_gesture = None;
                self.hold_start_ms = 0.0;
                return None;
            }
        };

        if self.held_gesture.as_deref() != Some(result.gesture_name.as_str()) {
            self.held_gesture = Some(result.gesture_name.clone());
            self.hold_start_ms = now_ms;
        }

        if now_ms - self.hold_start_ms < self.config.debounce_ms || self.in_cooldown(now_ms) {
            return None;
        }

        let action = self.actions.action_for(&result.gesture_name)?.to_string();

        tracing::info!(
            "Gesture '{}' triggered action '{}' (confidence {:.2})",
            result.gesture_name,
            action,
            result.confidence
        );

        self.cooldown_until_ms = Some(now_ms + self.config.cooldown_ms);
        self.held_gesture = None;
        self.hold_start_ms = 0.0;

        Some(Command::Trigger {
            gesture: result.gesture_name.clone(),
            action,
            confidence: result.confidence,
        })
    }

    fn in_cooldown(&self, now_ms: f64) -> bool {
        self.cooldown_until_ms.map_or(false, |until| now_ms < until)
    }

    pub fn state(&self, now_ms: f64) -> GateState {
        if let Some(until_ms) = self.cooldown_until_ms.filter(|&until| now_ms < until) {
            return GateState::Cooldown { until_ms };
        }
        match &self.held_gesture {
            Some(gesture) => GateState::Held {
                gesture: gesture.clone(),
                since_ms: self.hold_start_ms,
            },
            None => GateState::Idle,
        }
    }

    pub fn set_actions(&mut self, actions: ActionMapping) {
        self.actions = actions;
    }

    pub fn reset(&mut self) {
        self.held_gesture = None;
        self.hold_start_ms = 0.0;
        self.cooldown_until_ms = None;
    }
}
