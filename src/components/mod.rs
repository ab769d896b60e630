//! Component models for circuit analysis.
//!
//! This module provides the five component kinds a user can place:
//! - Sources: Battery
//! - Loads: Resistor, Lamp
//! - Controls: Switch
//! - Conductors: Wire
//!
//! Every component carries exactly two terminals (`a` and `b`).

mod controls;
mod linear;
mod sources;
mod wire;

pub use controls::{Switch, SwitchState};
pub use linear::{is_usable_resistance, Lamp, Resistor};
pub use sources::Battery;
pub use wire::{Wire, WireEnds};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::circuit::{ComponentId, Placement, Rotation};
use crate::dsl::ComponentDef;
use crate::error::{KirchhoffError, Result};

/// The kind of a component, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Battery,
    Resistor,
    Lamp,
    Switch,
    Wire,
}

impl ComponentKind {
    /// Parse a component kind from its netlist keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "BAT" | "BATT" | "BATTERY" | "V" => Some(Self::Battery),
            "R" | "RES" | "RESISTOR" => Some(Self::Resistor),
            "LAMP" | "BULB" => Some(Self::Lamp),
            "SW" | "SWITCH" => Some(Self::Switch),
            "WIRE" => Some(Self::Wire),
            _ => None,
        }
    }

    /// Whether components of this kind are loads (resistors and lamps).
    pub fn is_resistive(self) -> bool {
        matches!(self, Self::Resistor | Self::Lamp)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Battery => "battery",
            Self::Resistor => "resistor",
            Self::Lamp => "lamp",
            Self::Switch => "switch",
            Self::Wire => "wire",
        };
        f.write_str(label)
    }
}

/// A circuit component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Component {
    Battery(Battery),
    Resistor(Resistor),
    Lamp(Lamp),
    Switch(Switch),
    Wire(Wire),
}

impl Component {
    /// Create a component from a netlist definition.
    ///
    /// Wire endpoint bindings are resolved by the caller, which owns the
    /// name table, and passed in as `ends`.
    pub fn from_def(id: ComponentId, def: &ComponentDef, ends: WireEnds) -> Result<Self> {
        let placement = placement_from_def(def)?;

        if def.component_type != ComponentKind::Wire && !def.ends.is_empty() {
            return Err(KirchhoffError::invalid_component(
                &def.name,
                def.line,
                "only wires take terminal bindings",
            ));
        }

        let mut component = match def.component_type {
            ComponentKind::Battery => {
                reject_keywords(def)?;
                let voltage = def.value.unwrap_or(Battery::DEFAULT_VOLTAGE);
                Component::Battery(Battery::new(id, def.name.clone(), voltage))
            }

            ComponentKind::Resistor => {
                reject_keywords(def)?;
                let resistance = def.value.unwrap_or(Resistor::DEFAULT_RESISTANCE);
                Component::Resistor(Resistor::new(id, def.name.clone(), resistance))
            }

            ComponentKind::Lamp => {
                reject_keywords(def)?;
                let resistance = def.value.unwrap_or(Lamp::DEFAULT_RESISTANCE);
                Component::Lamp(Lamp::new(id, def.name.clone(), resistance))
            }

            ComponentKind::Switch => {
                let mut state = def
                    .params
                    .get("state")
                    .map(|v| if *v > 0.5 { SwitchState::Closed } else { SwitchState::Open })
                    .unwrap_or_default();
                for keyword in &def.keywords {
                    state = SwitchState::from_keyword(keyword).ok_or_else(|| {
                        KirchhoffError::invalid_parameter(
                            &def.name,
                            "state",
                            format!("expected 'open' or 'closed', got '{}'", keyword),
                        )
                    })?;
                }
                if def.value.is_some() {
                    return Err(KirchhoffError::invalid_component(
                        &def.name,
                        def.line,
                        "a switch takes a state, not a value",
                    ));
                }
                Component::Switch(Switch::new(id, def.name.clone(), state))
            }

            ComponentKind::Wire => {
                reject_keywords(def)?;
                let mut wire = Wire::new(id, def.name.clone());
                wire.ends = ends;
                Component::Wire(wire)
            }
        };

        *component.placement_mut() = placement;
        Ok(component)
    }

    /// Get the component ID.
    pub fn id(&self) -> ComponentId {
        match self {
            Component::Battery(b) => b.id,
            Component::Resistor(r) => r.id,
            Component::Lamp(l) => l.id,
            Component::Switch(s) => s.id,
            Component::Wire(w) => w.id,
        }
    }

    /// Get the component name.
    pub fn name(&self) -> &str {
        match self {
            Component::Battery(b) => &b.name,
            Component::Resistor(r) => &r.name,
            Component::Lamp(l) => &l.name,
            Component::Switch(s) => &s.name,
            Component::Wire(w) => &w.name,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Battery(_) => ComponentKind::Battery,
            Component::Resistor(_) => ComponentKind::Resistor,
            Component::Lamp(_) => ComponentKind::Lamp,
            Component::Switch(_) => ComponentKind::Switch,
            Component::Wire(_) => ComponentKind::Wire,
        }
    }

    pub fn placement(&self) -> &Placement {
        match self {
            Component::Battery(b) => &b.placement,
            Component::Resistor(r) => &r.placement,
            Component::Lamp(l) => &l.placement,
            Component::Switch(s) => &s.placement,
            Component::Wire(w) => &w.placement,
        }
    }

    pub fn placement_mut(&mut self) -> &mut Placement {
        match self {
            Component::Battery(b) => &mut b.placement,
            Component::Resistor(r) => &mut r.placement,
            Component::Lamp(l) => &mut l.placement,
            Component::Switch(s) => &mut s.placement,
            Component::Wire(w) => &mut w.placement,
        }
    }

    /// Resistance of a load, `None` for every other kind.
    pub fn resistance(&self) -> Option<f64> {
        match self {
            Component::Resistor(r) => Some(r.resistance),
            Component::Lamp(l) => Some(l.resistance),
            _ => None,
        }
    }

    /// Check if this component is a load (resistor or lamp).
    pub fn is_resistive(&self) -> bool {
        self.kind().is_resistive()
    }

    pub fn is_lamp(&self) -> bool {
        matches!(self, Component::Lamp(_))
    }

    pub fn is_battery(&self) -> bool {
        matches!(self, Component::Battery(_))
    }

    pub fn is_switch(&self) -> bool {
        matches!(self, Component::Switch(_))
    }

    pub fn is_wire(&self) -> bool {
        matches!(self, Component::Wire(_))
    }

    /// Check if this component is a switch in the open position.
    pub fn is_open_switch(&self) -> bool {
        matches!(self, Component::Switch(s) if s.is_open())
    }
}

fn placement_from_def(def: &ComponentDef) -> Result<Placement> {
    let x = def.params.get("x").copied().unwrap_or(0.0);
    let y = def.params.get("y").copied().unwrap_or(0.0);
    let rotation = match def.params.get("rot").or_else(|| def.params.get("rotation")) {
        Some(degrees) if degrees.fract() == 0.0 => Rotation::from_degrees(*degrees as i64),
        Some(_) => None,
        None => Some(Rotation::Deg0),
    }
    .ok_or_else(|| {
        KirchhoffError::invalid_parameter(&def.name, "rot", "rotation must be a multiple of 90 degrees")
    })?;

    Ok(Placement { x, y, rotation })
}

fn reject_keywords(def: &ComponentDef) -> Result<()> {
    match def.keywords.first() {
        Some(keyword) => Err(KirchhoffError::invalid_component(
            &def.name,
            def.line,
            format!("unexpected argument '{}'", keyword),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn def(component_type: ComponentKind, name: &str) -> ComponentDef {
        ComponentDef {
            component_type,
            name: name.to_string(),
            value: None,
            keywords: Vec::new(),
            params: HashMap::new(),
            ends: Vec::new(),
            line: 1,
        }
    }

    #[test]
    fn test_defaults_match_editor() {
        let battery = Component::from_def(ComponentId(0), &def(ComponentKind::Battery, "B1"), WireEnds::default()).unwrap();
        assert!(matches!(battery, Component::Battery(ref b) if b.voltage == 12.0));

        let lamp = Component::from_def(ComponentId(1), &def(ComponentKind::Lamp, "L1"), WireEnds::default()).unwrap();
        assert_eq!(lamp.resistance(), Some(50.0));

        let resistor = Component::from_def(ComponentId(2), &def(ComponentKind::Resistor, "R1"), WireEnds::default()).unwrap();
        assert_eq!(resistor.resistance(), Some(100.0));

        let switch = Component::from_def(ComponentId(3), &def(ComponentKind::Switch, "S1"), WireEnds::default()).unwrap();
        assert!(switch.is_open_switch());
    }

    #[test]
    fn test_placement_params() {
        let mut d = def(ComponentKind::Battery, "B1");
        d.params.insert("x".to_string(), 120.0);
        d.params.insert("y".to_string(), 40.0);
        d.params.insert("rot".to_string(), 180.0);
        let battery = Component::from_def(ComponentId(0), &d, WireEnds::default()).unwrap();
        assert_eq!(battery.placement().x, 120.0);
        assert_eq!(battery.placement().rotation, Rotation::Deg180);

        d.params.insert("rot".to_string(), 45.0);
        assert!(Component::from_def(ComponentId(0), &d, WireEnds::default()).is_err());
    }

    #[test]
    fn test_switch_state_keyword() {
        let mut d = def(ComponentKind::Switch, "S1");
        d.keywords.push("closed".to_string());
        let sw = Component::from_def(ComponentId(0), &d, WireEnds::default()).unwrap();
        assert!(!sw.is_open_switch());

        d.keywords = vec!["sideways".to_string()];
        assert!(Component::from_def(ComponentId(0), &d, WireEnds::default()).is_err());
    }

    #[test]
    fn test_kind_keywords() {
        assert_eq!(ComponentKind::from_keyword("bat"), Some(ComponentKind::Battery));
        assert_eq!(ComponentKind::from_keyword("LAMP"), Some(ComponentKind::Lamp));
        assert_eq!(ComponentKind::from_keyword("sw"), Some(ComponentKind::Switch));
        assert_eq!(ComponentKind::from_keyword("Q"), None);
        assert!(ComponentKind::Lamp.is_resistive());
        assert!(!ComponentKind::Switch.is_resistive());
    }

    #[test]
    fn test_serde_tagged() {
        let lamp = Component::Lamp(Lamp::new(ComponentId(5), "L1".to_string(), 50.0));
        let json = serde_json::to_string(&lamp).unwrap();
        assert!(json.contains("\"type\":\"lamp\""));
        let back: Component = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lamp);
    }
}
