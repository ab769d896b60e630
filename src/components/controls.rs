//! Control components: Switch.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::circuit::{ComponentId, Placement};

/// Position of a switch lever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    #[default]
    Open,
    Closed,
}

impl SwitchState {
    /// Parse a state keyword (`open`/`off` or `closed`/`close`/`on`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "open" | "off" => Some(SwitchState::Open),
            "closed" | "close" | "on" => Some(SwitchState::Closed),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SwitchState::Open => SwitchState::Closed,
            SwitchState::Closed => SwitchState::Open,
        }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchState::Open => write!(f, "open"),
            SwitchState::Closed => write!(f, "closed"),
        }
    }
}

/// A switch component.
///
/// For topology its two terminals are always one electrical node, whatever
/// the state. The state only gates current flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Switch {
    pub id: ComponentId,
    pub name: String,
    #[serde(default)]
    pub placement: Placement,
    #[serde(default)]
    pub state: SwitchState,
}

impl Switch {
    /// Create a new switch.
    pub fn new(id: ComponentId, name: String, state: SwitchState) -> Self {
        Self {
            id,
            name,
            placement: Placement::default(),
            state,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == SwitchState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == SwitchState::Closed
    }

    /// Set the switch state.
    pub fn set_state(&mut self, state: SwitchState) {
        self.state = state;
    }

    /// Toggle the switch state.
    pub fn toggle(&mut self) {
        self.state = self.state.toggled();
    }
}
