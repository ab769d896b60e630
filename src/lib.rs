//! # Kirchhoff Core
//!
//! Topology and current-flow analysis for a classroom circuit builder.
//!
//! This library provides:
//! - A data model for freely wired batteries, resistors, lamps, switches and wires
//! - A netlist format for describing those circuits as text
//! - Series / parallel / mixed classification with branch-local switch isolation
//! - Steady-state DC currents, voltages, lamp power and lamp brightness
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`dsl`] - Parser for the circuit netlist
//! - [`circuit`] - Circuit table, ids, terminals and validation
//! - [`components`] - The five component kinds
//! - [`solver`] - Node merging, topology classification and the DC solve
//! - `report` - Text and JSON reports (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! kirchhoff demos/parallel.cir
//! kirchhoff --json --grouping placement demos/parallel.cir
//! ```
//!
//! ### Library
//!
//! ```
//! use kirchhoff_core::{dsl, Circuit};
//!
//! let ast = dsl::parse("BAT B1 12\nR R1 100\n.connect B1.b R1.a\n.connect R1.b B1.a").unwrap();
//! let circuit = Circuit::from_ast(ast).unwrap();
//! let result = circuit.analyze();
//! assert!((result.total_current - 0.12).abs() < 1e-12);
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmCircuitAnalyzer } from 'kirchhoff_core';
//!
//! const analyzer = new WasmCircuitAnalyzer(netlist);
//! analyzer.set_switch('S1', true);
//! const result = JSON.parse(analyzer.analyze());
//! ```
//!
//! ## Analysis Method
//!
//! Each call re-runs the whole pipeline; there is no state between calls:
//!
//! 1. Merge terminals into electrical nodes with union-find
//! 2. Find branch points and split loads into parallel branches and a series remainder
//! 3. Decide which loads an open switch cuts off
//! 4. Combine active loads and solve for currents

pub mod circuit;
pub mod components;
pub mod dsl;
pub mod error;
pub mod solver;

#[cfg(feature = "cli")]
pub mod report;

// Re-export main types for convenience
pub use circuit::Circuit;
pub use error::{KirchhoffError, Result};
pub use solver::{AnalysisResult, Analyzer, AnalyzerConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuitAnalyzer;

/// Analyze a circuit with the default configuration.
pub fn analyze(
    components: &[crate::components::Component],
    connections: &[crate::circuit::Connection],
) -> AnalysisResult {
    Analyzer::new().analyze(components, connections)
}
