//! Voltage sources.

use serde::{Deserialize, Serialize};

use crate::circuit::{ComponentId, Placement, Rotation, Terminal};

/// An ideal DC battery.
///
/// Multiple batteries in one circuit are treated as additive; no internal
/// topology between them is modeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    pub id: ComponentId,
    pub name: String,
    #[serde(default)]
    pub placement: Placement,
    /// Terminal voltage in volts
    pub voltage: f64,
}

impl Battery {
    /// Voltage of a freshly placed battery.
    pub const DEFAULT_VOLTAGE: f64 = 12.0;

    /// Create a new battery.
    pub fn new(id: ComponentId, name: String, voltage: f64) -> Self {
        Self {
            id,
            name,
            placement: Placement::default(),
            voltage,
        }
    }

    /// The positive pole, which follows the rotation on the canvas:
    /// right (0°) and down (90°) are terminal `b`, left (180°) and up (270°)
    /// are terminal `a`.
    pub fn positive_terminal(&self) -> Terminal {
        match self.placement.rotation {
            Rotation::Deg0 | Rotation::Deg90 => Terminal::B,
            Rotation::Deg180 | Rotation::Deg270 => Terminal::A,
        }
    }

    pub fn negative_terminal(&self) -> Terminal {
        self.positive_terminal().opposite()
    }
}
