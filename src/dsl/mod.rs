//! Netlist parser for circuit descriptions.
//!
//! A small line-oriented text format for describing the circuits a user
//! builds on the canvas, so they can be analyzed from the command line,
//! stored as fixtures, or handed to the WASM binding.
//!
//! # Grammar Overview
//!
//! ```text
//! circuit     = { line }
//! line        = comment | directive | component | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = ".connect" terminal terminal | ".title" { identifier }
//! component   = kind name { value | keyword | terminal | param }
//!
//! kind        = "BAT" | "R" | "LAMP" | "SW" | "WIRE"
//! terminal    = name '.' ('a' | 'b')
//! param       = ("x" | "y" | "rot" | "state") '=' value
//! keyword     = "open" | "closed"
//! value       = number [unit_suffix]
//! unit_suffix = 'm' | 'k' | 'M'
//! ```
//!
//! # Component Kinds
//!
//! | Kind | Description | Syntax |
//! |------|-------------|--------|
//! | BAT | Battery | `BAT <name> [volts]` |
//! | R | Resistor | `R <name> [ohms]` |
//! | LAMP | Lamp | `LAMP <name> [ohms]` |
//! | SW | Switch | `SW <name> [open\|closed]` |
//! | WIRE | Wire component | `WIRE <name> [<end a>] [<end b>]` |
//!
//! Every component also accepts `x=`, `y=` and `rot=` placement parameters.
//!
//! # Example
//!
//! ```text
//! # Two lamps in parallel
//! BAT  B1 12
//! LAMP L1 50 y=100
//! LAMP L2 50 y=200
//! .connect B1.b L1.a
//! .connect B1.b L2.a
//! .connect L1.b B1.a
//! WIRE W1 L2.b B1.a
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a netlist string into an AST.
pub fn parse(input: &str) -> Result<CircuitAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a netlist file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<CircuitAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::KirchhoffError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
