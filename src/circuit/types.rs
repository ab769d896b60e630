//! Core types for circuit representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a component in the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub usize);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// An electrical node: a maximal set of terminals held at the same potential.
///
/// Node ids are assigned densely in component-table order every time the
/// terminals are merged, so they are only meaningful within one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// One of the two terminals every component carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    A,
    B,
}

impl Terminal {
    /// Both terminals, in slot order.
    pub const BOTH: [Terminal; 2] = [Terminal::A, Terminal::B];

    /// Slot index of this terminal (A = 0, B = 1).
    pub fn index(self) -> usize {
        match self {
            Terminal::A => 0,
            Terminal::B => 1,
        }
    }

    /// The terminal on the other end of the same component.
    pub fn opposite(self) -> Terminal {
        match self {
            Terminal::A => Terminal::B,
            Terminal::B => Terminal::A,
        }
    }

    /// Parse a terminal name (`a` or `b`, case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "a" => Some(Terminal::A),
            "b" => Some(Terminal::B),
            _ => None,
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::A => write!(f, "a"),
            Terminal::B => write!(f, "b"),
        }
    }
}

/// A specific terminal of a specific component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TerminalRef {
    pub component: ComponentId,
    pub terminal: Terminal,
}

impl TerminalRef {
    pub fn new(component: ComponentId, terminal: Terminal) -> Self {
        Self { component, terminal }
    }
}

impl fmt::Display for TerminalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.terminal)
    }
}

/// A legacy direct wire record between two terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: TerminalRef,
    pub to: TerminalRef,
}

impl Connection {
    pub fn new(from: TerminalRef, to: TerminalRef) -> Self {
        Self { from, to }
    }
}

/// Quarter-turn rotation of a placed component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Build a rotation from degrees. Only multiples of 90 are accepted;
    /// negative and >= 360 values wrap.
    pub fn from_degrees(degrees: i64) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// The next quarter turn clockwise.
    pub fn rotated(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> std::result::Result<Self, Self::Error> {
        Rotation::from_degrees(i64::from(degrees))
            .ok_or_else(|| format!("rotation must be a multiple of 90 degrees, got {}", degrees))
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> u16 {
        rotation.degrees()
    }
}

/// Where a component sits on the editing canvas.
///
/// Placement never affects electrical law. It is read by the placement-based
/// branch grouping and, through the rotation, by battery polarity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation: Rotation,
}

impl Placement {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            rotation: Rotation::Deg0,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }
}
