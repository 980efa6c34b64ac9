//! Gesture-to-action mapping
//!
//! Action identifiers are opaque to this crate; the execution backend
//! resolves them. The built-in catalog mirrors what that backend knows so
//! configuration mistakes can be reported early.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Prefix of user-defined backend actions
pub const CUSTOM_ACTION_PREFIX: &str = "custom_";

/// Built-in backend actions and their descriptions
pub const BUILTIN_ACTIONS: &[(&str, &str)] = &[
    ("next_tab", "Next Tab (in-app)"),
    ("prev_tab", "Previous Tab (in-app)"),
    ("close_tab", "Close Tab (in-app)"),
    ("new_tab", "New Tab (in-app)"),
    ("switch_app", "Switch App (OS-level)"),
    ("close_window", "Close Window (OS-level)"),
    ("open_browser", "Open Browser"),
    ("volume_up", "Volume Up"),
    ("volume_down", "Volume Down"),
    ("play_pause", "Play/Pause"),
    ("copy", "Copy"),
    ("paste", "Paste"),
    ("scroll_up", "Scroll Up"),
    ("scroll_down", "Scroll Down"),
];

/// Description of a built-in action
pub fn describe_action(action: &str) -> Option<&'static str> {
    BUILTIN_ACTIONS
        .iter()
        .find(|(id, _)| *id == action)
        .map(|(_, description)| *description)
}

/// True for built-in ids and `custom_` ids
pub fn is_known_action(action: &str) -> bool {
    describe_action(action).is_some()
        || (action.starts_with(CUSTOM_ACTION_PREFIX) && action.len() > CUSTOM_ACTION_PREFIX.len())
}

/// Gesture name to action id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionMapping {
    bindings: HashMap<String, String>,
}

impl ActionMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style binding
    pub fn with(mut self, gesture: &str, action: &str) -> Self {
        self.bind(gesture, action);
        self
    }

    pub fn bind(&mut self, gesture: &str, action: &str) {
        self.bindings.insert(gesture.to_string(), action.to_string());
    }

    pub fn action_for(&self, gesture: &str) -> Option<&str> {
        self.bindings.get(gesture).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// `(gesture, action)` pairs whose action the backend will not recognize
    pub fn unknown_actions(&self) -> Vec<(String, String)> {
        let mut unknown: Vec<(String, String)> = self
            .bindings
            .iter()
            .filter(|(_, action)| !is_known_action(action))
            .map(|(gesture, action)| (gesture.clone(), action.clone()))
            .collect();
        unknown.sort();
        unknown
    }

    /// Log a warning for every binding the backend will not recognize
    pub fn warn_unknown(&self) {
        for (gesture, action) in self.unknown_actions() {
            tracing::warn!("Gesture '{}' is mapped to unknown action '{}'", gesture, action);
        }
    }
}
