//! Circuit validation.
//!
//! Nothing found here stops an analysis: the analyzer is total and degrades
//! to the zero state. These findings exist so a host can explain *why* a lamp
//! stays dark.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::{Circuit, ComponentId, TerminalRef};
use crate::components::{is_usable_resistance, Component};

/// A non-fatal problem found in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A connection end or wire binding points at a component that does not
    /// exist. `index` counts connection ends first, then wire bindings.
    DanglingReference { index: usize, target: TerminalRef },
    /// A connection record in a loaded snapshot named a terminal that
    /// cannot exist and was dropped. `index` is its position in the snapshot.
    SkippedConnection { index: usize },
    /// Two components share an id; only the first is analyzed.
    DuplicateId { id: ComponentId },
    /// A wire component with at least one end not bound to anything.
    UnboundWireEnd { id: ComponentId },
    /// A load whose resistance cannot carry current.
    UnusableResistance { id: ComponentId, resistance: f64 },
    /// No battery at all.
    NoBattery,
    /// No resistor or lamp at all.
    NoLoad,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DanglingReference { index, target } => {
                write!(f, "reference #{} points at missing terminal {}", index, target)
            }
            Diagnostic::SkippedConnection { index } => {
                write!(f, "connection #{} could not be read and was ignored", index)
            }
            Diagnostic::DuplicateId { id } => write!(f, "component id {} is used more than once", id),
            Diagnostic::UnboundWireEnd { id } => write!(f, "wire {} has an unbound end", id),
            Diagnostic::UnusableResistance { id, resistance } => {
                write!(f, "component {} has unusable resistance {} Ω", id, resistance)
            }
            Diagnostic::NoBattery => write!(f, "circuit has no battery"),
            Diagnostic::NoLoad => write!(f, "circuit has no resistor or lamp"),
        }
    }
}

/// Validate a circuit for analysis.
///
/// Checks:
/// - All connection and wire-binding targets exist
/// - No connection record was dropped while loading
/// - Component ids are unique
/// - Every wire has both ends bound
/// - Load resistances are positive and finite
/// - There is at least one battery and one load
pub fn validate_circuit(circuit: &Circuit) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut ids = HashSet::new();

    for component in &circuit.components {
        if !ids.insert(component.id()) {
            diagnostics.push(Diagnostic::DuplicateId { id: component.id() });
        }
    }

    let targets = circuit
        .connections
        .iter()
        .flat_map(|c| [c.from, c.to])
        .chain(circuit.components.iter().flat_map(|c| match c {
            Component::Wire(w) => [w.ends.a, w.ends.b].into_iter().flatten().collect::<Vec<_>>(),
            _ => Vec::new(),
        }));
    for (index, target) in targets.enumerate() {
        if !ids.contains(&target.component) {
            diagnostics.push(Diagnostic::DanglingReference { index, target });
        }
    }

    diagnostics.extend(
        circuit
            .skipped_connections
            .iter()
            .map(|&index| Diagnostic::SkippedConnection { index }),
    );

    for component in &circuit.components {
        match component {
            Component::Wire(w) if !w.is_fully_bound() => {
                diagnostics.push(Diagnostic::UnboundWireEnd { id: w.id });
            }
            Component::Resistor(_) | Component::Lamp(_) => {
                let resistance = component.resistance().unwrap_or_default();
                if !is_usable_resistance(resistance) {
                    diagnostics.push(Diagnostic::UnusableResistance {
                        id: component.id(),
                        resistance,
                    });
                }
            }
            _ => {}
        }
    }

    if !circuit.components.iter().any(Component::is_battery) {
        diagnostics.push(Diagnostic::NoBattery);
    }
    if !circuit.components.iter().any(Component::is_resistive) {
        diagnostics.push(Diagnostic::NoLoad);
    }

    for diagnostic in &diagnostics {
        tracing::warn!(%diagnostic, "circuit validation");
    }

    diagnostics
}
