//! Report output for the CLI frontend.
//!
//! Renders an [`AnalysisResult`] as a plain-text table or as JSON.

use std::io::{self, Write};

use serde::Serialize;

use crate::circuit::{Circuit, ComponentId, Diagnostic};
use crate::error::{KirchhoffError, Result};
use crate::solver::AnalysisResult;

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// One analyzed circuit, ready to print.
pub struct Report<'a> {
    circuit: &'a Circuit,
    result: &'a AnalysisResult,
    diagnostics: &'a [Diagnostic],
}

#[derive(Serialize)]
struct JsonReport<'a> {
    title: Option<&'a str>,
    diagnostics: &'a [Diagnostic],
    analysis: &'a AnalysisResult,
}

impl<'a> Report<'a> {
    pub fn new(circuit: &'a Circuit, result: &'a AnalysisResult, diagnostics: &'a [Diagnostic]) -> Self {
        Self {
            circuit,
            result,
            diagnostics,
        }
    }

    /// Write the report to stdout.
    pub fn print(&self, format: ReportFormat) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write(&mut out, format)?;
        out.flush().map_err(write_error)
    }

    pub fn write<W: Write>(&self, out: &mut W, format: ReportFormat) -> Result<()> {
        match format {
            ReportFormat::Text => self.write_text(out).map_err(write_error),
            ReportFormat::Json => self.write_json(out),
        }
    }

    fn write_json<W: Write>(&self, out: &mut W) -> Result<()> {
        let report = JsonReport {
            title: self.circuit.title.as_deref(),
            diagnostics: self.diagnostics,
            analysis: self.result,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out).map_err(write_error)
    }

    fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let r = self.result;

        writeln!(out, "Circuit: {}", self.circuit.title.as_deref().unwrap_or("untitled"))?;
        writeln!(
            out,
            "Topology: {} ({} branch point{})",
            r.topology,
            r.branch_points.len(),
            if r.branch_points.len() == 1 { "" } else { "s" }
        )?;
        writeln!(
            out,
            "Connected: {}  Closed: {}  Open switch: {}",
            yes_no(r.is_connected),
            yes_no(r.is_closed),
            yes_no(r.has_open_switch)
        )?;
        writeln!(
            out,
            "Total: {:.3} V  {:.3} Ω  {:.3} A  {:.3} W",
            r.total_voltage, r.total_resistance, r.total_current, r.total_power
        )?;

        if !r.branches.is_empty() {
            writeln!(out)?;
            writeln!(out, "Branches:")?;
            for (n, branch) in r.branches.iter().enumerate() {
                writeln!(
                    out,
                    "  #{} [{}] {}  {:.3} Ω  {:.3} A",
                    n + 1,
                    self.names(&branch.members),
                    if branch.active { "active" } else { "open" },
                    branch.resistance,
                    branch.current
                )?;
            }
            if !r.series_remainder.is_empty() {
                writeln!(out, "Series: [{}]", self.names(&r.series_remainder))?;
            }
        }

        writeln!(out)?;
        writeln!(out, "Components:")?;
        for (&id, c) in &r.components {
            write!(
                out,
                "  {:<8} {:<9} {:>8.3} A {:>8.3} V",
                self.name(id),
                c.kind.to_string(),
                c.current,
                c.voltage
            )?;
            if let Some(power) = c.power {
                write!(out, " {:>8.3} W", power)?;
            }
            if let Some(brightness) = c.brightness {
                write!(out, "  brightness {:.0}%", brightness * 100.0)?;
            }
            writeln!(out)?;
        }

        if !self.diagnostics.is_empty() {
            writeln!(out)?;
            writeln!(out, "Warnings:")?;
            for diagnostic in self.diagnostics {
                writeln!(out, "  - {}", diagnostic)?;
            }
        }

        Ok(())
    }

    fn name(&self, id: ComponentId) -> String {
        self.circuit
            .component(id)
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| id.to_string())
    }

    fn names(&self, ids: &[ComponentId]) -> String {
        ids.iter().map(|&id| self.name(id)).collect::<Vec<_>>().join(", ")
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn write_error(e: io::Error) -> KirchhoffError {
    KirchhoffError::ReportWriteError {
        message: e.to_string(),
    }
}
