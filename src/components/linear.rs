//! Resistive loads: Resistor and Lamp.

use serde::{Deserialize, Serialize};

use crate::circuit::{ComponentId, Placement};

/// A plain resistor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resistor {
    pub id: ComponentId,
    pub name: String,
    #[serde(default)]
    pub placement: Placement,
    /// Resistance in ohms
    pub resistance: f64,
}

impl Resistor {
    /// Resistance of a freshly placed resistor.
    pub const DEFAULT_RESISTANCE: f64 = 100.0;

    /// Create a new resistor.
    pub fn new(id: ComponentId, name: String, resistance: f64) -> Self {
        Self {
            id,
            name,
            placement: Placement::default(),
            resistance,
        }
    }
}

/// A lamp.
///
/// Electrically identical to a resistor; kept distinct so power and
/// brightness can be reported for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lamp {
    pub id: ComponentId,
    pub name: String,
    #[serde(default)]
    pub placement: Placement,
    /// Filament resistance in ohms
    pub resistance: f64,
}

impl Lamp {
    /// Resistance of a freshly placed lamp.
    pub const DEFAULT_RESISTANCE: f64 = 50.0;

    /// Create a new lamp.
    pub fn new(id: ComponentId, name: String, resistance: f64) -> Self {
        Self {
            id,
            name,
            placement: Placement::default(),
            resistance,
        }
    }

    /// Power dissipated by the filament at the given current.
    pub fn power_at(&self, current: f64) -> f64 {
        current * current * self.resistance
    }
}

/// Whether a resistance value can carry a load.
///
/// Zero, negative and non-finite resistances are never treated as active
/// loads, so the solver cannot divide by zero.
pub fn is_usable_resistance(resistance: f64) -> bool {
    resistance.is_finite() && resistance > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lamp_power() {
        let lamp = Lamp::new(ComponentId(0), "L1".to_string(), 50.0);
        assert_relative_eq!(lamp.power_at(0.24), 2.88, epsilon = 1e-12);
        assert_relative_eq!(lamp.power_at(0.0), 0.0);
    }

    #[test]
    fn test_usable_resistance() {
        assert!(is_usable_resistance(100.0));
        assert!(!is_usable_resistance(0.0));
        assert!(!is_usable_resistance(-5.0));
        assert!(!is_usable_resistance(f64::NAN));
        assert!(!is_usable_resistance(f64::INFINITY));
    }
}
