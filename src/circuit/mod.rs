//! Circuit graph representation and validation.
//!
//! This module provides the data model the analyzer reads: typed components
//! in one flat table and the terminal-level connections between them.

mod graph;
mod types;
mod validate;

pub use graph::Circuit;
pub use types::*;
pub use validate::{validate_circuit, Diagnostic};
