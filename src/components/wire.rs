//! User-placed wire components.

use serde::{Deserialize, Deserializer, Serialize};

use crate::circuit::{ComponentId, Placement, Terminal, TerminalRef};

/// Endpoint bindings of a wire component. Either end may be unbound while
/// the user is still drawing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WireEnds {
    #[serde(default, deserialize_with = "lenient_end")]
    pub a: Option<TerminalRef>,
    #[serde(default, deserialize_with = "lenient_end")]
    pub b: Option<TerminalRef>,
}

/// An end bound to a terminal that cannot exist is read as unbound.
fn lenient_end<'de, D>(deserializer: D) -> Result<Option<TerminalRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match serde_json::from_value(value) {
        Ok(end) => Some(end),
        Err(error) => {
            tracing::warn!(%error, "ignoring unreadable wire binding");
            None
        }
    }))
}

/// An explicit conductor placed on the canvas.
///
/// Distinct from legacy [`Connection`](crate::circuit::Connection) records:
/// the wire is itself a component, and each of its terminals may be bound
/// to a terminal of another component (including another wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    pub id: ComponentId,
    pub name: String,
    #[serde(default)]
    pub placement: Placement,
    #[serde(default)]
    pub ends: WireEnds,
}

impl Wire {
    /// Create a new, unbound wire.
    pub fn new(id: ComponentId, name: String) -> Self {
        Self {
            id,
            name,
            placement: Placement::default(),
            ends: WireEnds::default(),
        }
    }

    /// Bind one end of the wire to a component terminal.
    pub fn bind(&mut self, end: Terminal, target: TerminalRef) {
        match end {
            Terminal::A => self.ends.a = Some(target),
            Terminal::B => self.ends.b = Some(target),
        }
    }

    pub fn binding(&self, end: Terminal) -> Option<TerminalRef> {
        match end {
            Terminal::A => self.ends.a,
            Terminal::B => self.ends.b,
        }
    }

    pub fn is_fully_bound(&self) -> bool {
        self.ends.a.is_some() && self.ends.b.is_some()
    }
}
