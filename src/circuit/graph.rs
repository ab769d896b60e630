//! Circuit graph structure.
//!
//! A [`Circuit`] is the flat component table plus the list of legacy direct
//! wires. No component owns another; every reference is a [`ComponentId`]
//! looked up in the table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::types::{ComponentId, Connection, TerminalRef};
use crate::components::{Component, SwitchState, WireEnds};
use crate::dsl::{CircuitAst, TerminalName};
use crate::error::{KirchhoffError, Result};
use crate::solver::{AnalysisResult, Analyzer, AnalyzerConfig};

/// A complete circuit as built on the canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CircuitSnapshot")]
pub struct Circuit {
    /// Optional human-readable title
    pub title: Option<String>,

    /// All components, in placement order
    pub components: Vec<Component>,

    /// Legacy direct wire records
    pub connections: Vec<Connection>,

    /// Positions of connection records in the loaded snapshot that could
    /// not be read and were dropped.
    #[serde(skip)]
    pub skipped_connections: Vec<usize>,
}

/// Wire form of a [`Circuit`]. Connection records are decoded one by one so
/// a malformed record costs only itself.
#[derive(Deserialize)]
struct CircuitSnapshot {
    #[serde(default)]
    title: Option<String>,
    components: Vec<Component>,
    #[serde(default)]
    connections: Vec<serde_json::Value>,
}

impl From<CircuitSnapshot> for Circuit {
    fn from(snapshot: CircuitSnapshot) -> Self {
        let mut connections = Vec::with_capacity(snapshot.connections.len());
        let mut skipped_connections = Vec::new();
        for (index, value) in snapshot.connections.into_iter().enumerate() {
            match serde_json::from_value::<Connection>(value) {
                Ok(connection) => connections.push(connection),
                Err(error) => {
                    tracing::warn!(index, %error, "ignoring unreadable connection");
                    skipped_connections.push(index);
                }
            }
        }
        Circuit {
            title: snapshot.title,
            components: snapshot.components,
            connections,
            skipped_connections,
        }
    }
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a circuit from a parsed netlist AST.
    ///
    /// Component ids are assigned in declaration order. Unlike the analyzer,
    /// which ignores dangling references, the netlist is strict: a reference
    /// to an undeclared name is a typo and is reported.
    pub fn from_ast(ast: CircuitAst) -> Result<Self> {
        let mut name_map: HashMap<&str, ComponentId> = HashMap::new();

        for (idx, def) in ast.components.iter().enumerate() {
            if name_map.insert(def.name.as_str(), ComponentId(idx)).is_some() {
                return Err(KirchhoffError::DuplicateComponent {
                    name: def.name.clone(),
                    line: def.line,
                });
            }
        }

        let resolve = |name: &TerminalName, line: usize| -> Result<TerminalRef> {
            name_map
                .get(name.component.as_str())
                .map(|&id| TerminalRef::new(id, name.terminal))
                .ok_or_else(|| KirchhoffError::UnknownComponent {
                    name: name.component.clone(),
                    line,
                })
        };

        let mut components = Vec::with_capacity(ast.components.len());
        for (idx, def) in ast.components.iter().enumerate() {
            let mut ends = WireEnds::default();
            if let Some(end) = def.ends.first() {
                ends.a = Some(resolve(end, def.line)?);
            }
            if let Some(end) = def.ends.get(1) {
                ends.b = Some(resolve(end, def.line)?);
            }
            components.push(Component::from_def(ComponentId(idx), def, ends)?);
        }

        let connections = ast
            .connections
            .iter()
            .map(|c| Ok(Connection::new(resolve(&c.from, c.line)?, resolve(&c.to, c.line)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Circuit {
            title: ast.title,
            components,
            connections,
            skipped_connections: Vec::new(),
        })
    }

    /// Decode a circuit from its JSON form.
    ///
    /// Connection records naming a terminal that does not exist are dropped
    /// and listed in [`skipped_connections`](Self::skipped_connections).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the circuit as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Next unused component id.
    pub fn next_id(&self) -> ComponentId {
        ComponentId(
            self.components
                .iter()
                .map(|c| c.id().0 + 1)
                .max()
                .unwrap_or(0),
        )
    }

    /// Append a component and return its id.
    pub fn add(&mut self, component: Component) -> ComponentId {
        let id = component.id();
        self.components.push(component);
        id
    }

    /// Add a legacy direct wire between two terminals.
    pub fn connect(&mut self, from: TerminalRef, to: TerminalRef) {
        self.connections.push(Connection::new(from, to));
    }

    /// Find a component by id.
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id() == id)
    }

    /// Find a component by name.
    pub fn find(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name() == name)
    }

    /// Set the state of the switch with the given name.
    /// Returns `false` if no such switch exists.
    pub fn set_switch(&mut self, name: &str, state: SwitchState) -> bool {
        for component in &mut self.components {
            if let Component::Switch(sw) = component {
                if sw.name == name {
                    sw.set_state(state);
                    return true;
                }
            }
        }
        false
    }

    /// Analyze the circuit with the default configuration.
    pub fn analyze(&self) -> AnalysisResult {
        Analyzer::new().analyze(&self.components, &self.connections)
    }

    /// Analyze the circuit with a custom configuration.
    pub fn analyze_with(&self, config: AnalyzerConfig) -> AnalysisResult {
        Analyzer::with_config(config).analyze(&self.components, &self.connections)
    }
}
