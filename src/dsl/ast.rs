//! Abstract Syntax Tree types for the circuit netlist.

use std::collections::HashMap;
use std::fmt;

use crate::circuit::Terminal;
use crate::components::ComponentKind;
use crate::error::{KirchhoffError, Result};

/// Complete AST representation of a parsed circuit.
#[derive(Debug, Clone, Default)]
pub struct CircuitAst {
    /// Optional title from a `.title` directive
    pub title: Option<String>,
    /// All component instances, in declaration order
    pub components: Vec<ComponentDef>,
    /// Legacy direct wires from `.connect` directives
    pub connections: Vec<ConnectionDef>,
}

impl CircuitAst {
    /// Create a new empty circuit AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A component definition from the netlist.
#[derive(Debug, Clone)]
pub struct ComponentDef {
    /// Component kind (BAT, R, LAMP, SW, WIRE)
    pub component_type: ComponentKind,
    /// Unique component name
    pub name: String,
    /// Voltage or resistance, if given
    pub value: Option<f64>,
    /// Bare keyword arguments (e.g. `open`, `closed`)
    pub keywords: Vec<String>,
    /// `key=value` parameters (x, y, rot, state)
    pub params: HashMap<String, f64>,
    /// Terminal bindings (wires only)
    pub ends: Vec<TerminalName>,
    /// Source line number for error reporting
    pub line: usize,
}

/// A `.connect` directive.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionDef {
    pub from: TerminalName,
    pub to: TerminalName,
    pub line: usize,
}

/// A terminal referenced by component name, written `<name>.<a|b>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalName {
    pub component: String,
    pub terminal: Terminal,
}

impl TerminalName {
    /// Split a `<name>.<terminal>` reference.
    pub fn parse(text: &str, line: usize) -> Result<Self> {
        let invalid = || KirchhoffError::InvalidTerminal {
            reference: text.to_string(),
            line,
        };
        let (component, terminal) = text.rsplit_once('.').ok_or_else(invalid)?;
        if component.is_empty() || component.contains('.') {
            return Err(invalid());
        }
        let terminal = Terminal::from_name(terminal).ok_or_else(invalid)?;
        Ok(Self {
            component: component.to_string(),
            terminal,
        })
    }
}

impl fmt::Display for TerminalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_name_parse() {
        let t = TerminalName::parse("B1.b", 1).unwrap();
        assert_eq!(t.component, "B1");
        assert_eq!(t.terminal, Terminal::B);

        assert!(TerminalName::parse("B1", 1).is_err());
        assert!(TerminalName::parse("B1.c", 1).is_err());
        assert!(TerminalName::parse(".a", 1).is_err());
        assert!(TerminalName::parse("x.y.a", 1).is_err());
    }
}
