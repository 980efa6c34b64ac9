use serde::{Deserialize, Serialize};

/// Event emitted to the command sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Trigger {
        gesture: String,
        action: String,
        confidence: f64,
    },
    Move {
        x: i32,
        y: i32,
    },
    LeftClick {
        x: i32,
        y: i32,
    },
    RightClick {
        x: i32,
        y: i32,
    },
    DoubleClick {
        x: i32,
        y: i32,
    },
}

impl Command {
    /// Wire name of the event type
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Trigger { .. } => "trigger",
            Command::Move { .. } => "move",
            Command::LeftClick { .. } => "left_click",
            Command::RightClick { .. } => "right_click",
            Command::DoubleClick { .. } => "double_click",
        }
    }

    /// Screen position for mouse events
    pub fn position(&self) -> Option<(i32, i32)> {
        match *self {
            Command::Trigger { .. } => None,
            Command::Move { x, y }
            | Command::LeftClick { x, y }
            | Command::RightClick { x, y }
            | Command::DoubleClick { x, y } => Some((x, y)),
        }
    }

    pub fn is_click(&self) -> bool {
        matches!(
            self,
            Command::LeftClick { .. } | Command::RightClick { .. } | Command::DoubleClick { .. }
        )
    }
}
