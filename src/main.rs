//! Kirchhoff - classroom circuit analyzer
//!
//! Reads a circuit netlist and reports whether it is closed, its topology,
//! and the current through every component.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=kirchhoff_core=debug kirchhoff --grouping placement circuit.cir
//! ```

use std::path::PathBuf;

use clap::Parser;
use kirchhoff_core::{
    circuit::{validate_circuit, Circuit},
    dsl,
    error::Result,
    report::{Report, ReportFormat},
    solver::{BranchGrouping, DEFAULT_ROW_GRID},
    AnalyzerConfig,
};
use tracing_subscriber::EnvFilter;

/// Classroom circuit analyzer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the circuit netlist (.cir)
    #[arg(value_name = "CIRCUIT_FILE")]
    circuit_file: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// How parallel branches are found: structural or placement
    #[arg(short, long, default_value_t = BranchGrouping::Structural)]
    grouping: BranchGrouping,

    /// Row height for placement grouping, in canvas units
    #[arg(long, default_value_t = DEFAULT_ROW_GRID)]
    row_grid: f64,

    /// Let current flow in a partly wired circuit
    #[arg(long)]
    allow_disconnected: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Parse the netlist
    let ast = dsl::parse_file(&args.circuit_file)?;

    // Build the circuit
    let circuit = Circuit::from_ast(ast)?;

    // Validate; findings are reported, not fatal
    let diagnostics = validate_circuit(&circuit);

    let config = AnalyzerConfig::new()
        .with_grouping(args.grouping)
        .with_row_grid(args.row_grid)
        .with_require_connected(!args.allow_disconnected);
    let result = circuit.analyze_with(config);

    let format = if args.json {
        ReportFormat::Json
    } else {
        ReportFormat::Text
    };
    Report::new(&circuit, &result, &diagnostics).print(format)?;

    Ok(())
}
