//! Analysis result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::topology::Topology;
use crate::circuit::{ComponentId, NodeId};
use crate::components::ComponentKind;
use crate::error::Result;

/// Electrical quantities for one component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentResult {
    pub kind: ComponentKind,
    /// Current in amperes
    pub current: f64,
    /// Voltage across the component in volts. For a battery this is its
    /// rated voltage; switches and wires drop nothing.
    pub voltage: f64,
    /// Dissipated power in watts, lamps only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
    /// Actual power over the power with plain resistors removed, lamps only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
}

impl ComponentResult {
    pub fn is_conducting(&self) -> bool {
        self.current != 0.0
    }
}

/// One parallel branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchReport {
    /// Loads and switches on the branch, in branch order
    pub members: Vec<ComponentId>,
    /// At least one load on the branch has an unbroken path
    pub active: bool,
    /// Harmonic sum over the branch's active loads, 0 when inactive
    pub resistance: f64,
    /// Sum of the currents of the branch's loads
    pub current: f64,
}

/// Conventional current direction along a legacy connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    /// From `from` to `to`
    Forward,
    /// From `to` to `from`
    Reverse,
    /// Not attached to a battery pole, or pointing at a missing component
    Unknown,
}

/// Everything the host needs to render one circuit state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Every component is reachable from the first battery
    pub is_connected: bool,
    /// Current actually flows around a loop
    pub is_closed: bool,
    pub has_open_switch: bool,
    pub topology: Topology,
    pub branch_points: Vec<NodeId>,
    pub branches: Vec<BranchReport>,
    pub series_remainder: Vec<ComponentId>,
    pub total_voltage: f64,
    pub total_resistance: f64,
    pub total_current: f64,
    pub total_power: f64,
    pub components: BTreeMap<ComponentId, ComponentResult>,
    /// One entry per input connection, in input order
    pub flows: Vec<FlowDirection>,
}

impl AnalysisResult {
    pub fn component(&self, id: ComponentId) -> Option<&ComponentResult> {
        self.components.get(&id)
    }

    /// Current through a component, 0 if it is unknown.
    pub fn current(&self, id: ComponentId) -> f64 {
        self.component(id).map(|r| r.current).unwrap_or(0.0)
    }

    pub fn lamp_power(&self, id: ComponentId) -> Option<f64> {
        self.component(id).and_then(|r| r.power)
    }

    pub fn brightness(&self, id: ComponentId) -> Option<f64> {
        self.component(id).and_then(|r| r.brightness)
    }

    /// Lamps with any brightness at all.
    pub fn lit_lamps(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.components
            .iter()
            .filter(|(_, r)| r.brightness.is_some_and(|b| b > 0.0))
            .map(|(&id, _)| id)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
