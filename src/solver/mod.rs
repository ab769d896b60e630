//! Topology and current-flow analysis.
//!
//! The analysis is a one-way pipeline, re-run in full on every edit:
//!
//! ```text
//! components + connections
//!   -> node merging      (union-find over terminals)
//!   -> classification    (branch points, parallel branches, series remainder)
//!   -> path activity     (which loads an open switch cuts off)
//!   -> DC solve          (harmonic sum over branches, series sum on top)
//!   -> AnalysisResult
//! ```
//!
//! ## Node merging
//!
//! Every `(component, terminal)` pair starts as its own node. Connections,
//! wire bindings, wire bodies and switch bodies merge them into electrical
//! nodes. Switches merge whatever their state: a switch changes which paths
//! are live, not the shape of the circuit.
//!
//! ## Solving
//!
//! With `V` the sum of battery voltages:
//! - active branch loads combine as `1 / Σ(1/Rᵢ)` and each carries `V / Rᵢ`
//! - active series loads add on top and carry `I = V / R_total`
//! - batteries, wires and closed switches outside a branch carry `I`
//!
//! No battery, no usable load or no active path gives the zero state.

mod activity;
mod analyzer;
mod electrical;
mod merge;
mod result;
mod topology;

pub use analyzer::{Analyzer, AnalyzerConfig};
pub use merge::DisjointSet;
pub use result::{AnalysisResult, BranchReport, ComponentResult, FlowDirection};
pub use topology::{BranchGrouping, Topology};

/// Default row height for placement grouping, in canvas units.
pub const DEFAULT_ROW_GRID: f64 = 50.0;
