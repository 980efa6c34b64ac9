//! Messages understood by the action execution backend
//!
//! Mouse events travel as `{"type": "mouse", "action", "x", "y"}` and
//! gesture triggers as `{"command", "confidence"}`; the backend looks the
//! command up in its own key map.

use crate::commands::types::Command;
use serde_json::{json, Value};

/// Convert a command into the backend's message shape
pub fn to_backend_message(command: &Command) -> Value {
    match command {
        Command::Trigger {
            action, confidence, ..
        } => json!({
            "command": action,
            "confidence": confidence,
        }),
        Command::Move { x, y }
        | Command::LeftClick { x, y }
        | Command::RightClick { x, y }
        | Command::DoubleClick { x, y } => json!({
            "type": "mouse",
            "action": command.kind(),
            "x": x,
            "y": y,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_message() {
        let msg = to_backend_message(&Command::RightClick { x: 5, y: 7 });
        assert_eq!(msg, json!({"type": "mouse", "action": "right_click", "x": 5, "y": 7}));
    }

    #[test]
    fn test_trigger_message_drops_gesture_name() {
        let msg = to_backend_message(&Command::Trigger {
            gesture: "fist".to_string(),
            action: "volume_up".to_string(),
            confidence: 1.0,
        });
        assert_eq!(msg, json!({"command": "volume_up", "confidence": 1.0}));
    }
}
