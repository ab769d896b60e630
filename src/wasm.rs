//! WASM bindings for Kirchhoff Core.
//!
//! This module provides JavaScript-friendly bindings for the browser editor.
//! The editor owns the circuit state; on every edit it pushes the change in
//! and reads a fresh analysis back as JSON.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuitAnalyzer } from 'kirchhoff_core';
//!
//! await init();
//!
//! const netlist = `
//!   BAT B1 12
//!   LAMP L1 50
//!   SW S1 open
//!   .connect B1.b L1.a
//!   .connect L1.b S1.a
//!   .connect S1.b B1.a
//! `;
//!
//! const analyzer = new WasmCircuitAnalyzer(netlist);
//! analyzer.set_switch('S1', true);
//! const result = JSON.parse(analyzer.analyze());
//! console.log(result.total_current); // 0.24
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{validate_circuit, Circuit};
use crate::components::SwitchState;
use crate::dsl;
use crate::error::KirchhoffError;
use crate::solver::{AnalyzerConfig, BranchGrouping, DEFAULT_ROW_GRID};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: KirchhoffError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible circuit analyzer.
///
/// Wraps a [`Circuit`] snapshot and an [`AnalyzerConfig`].
#[wasm_bindgen]
pub struct WasmCircuitAnalyzer {
    circuit: Circuit,
    config: AnalyzerConfig,
}

#[wasm_bindgen]
impl WasmCircuitAnalyzer {
    /// Create an analyzer from a circuit netlist.
    ///
    /// # Example
    /// ```javascript
    /// const analyzer = new WasmCircuitAnalyzer(netlist);
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(netlist: &str) -> Result<WasmCircuitAnalyzer, JsValue> {
        let ast = dsl::parse(netlist).map_err(to_js)?;
        let circuit = Circuit::from_ast(ast).map_err(to_js)?;
        Ok(Self::from_circuit(circuit))
    }

    /// Create an analyzer from the JSON form of a circuit, as exported by
    /// the editor.
    #[wasm_bindgen]
    pub fn from_json(json: &str) -> Result<WasmCircuitAnalyzer, JsValue> {
        let circuit = Circuit::from_json(json).map_err(to_js)?;
        Ok(Self::from_circuit(circuit))
    }

    /// Replace the circuit with a new JSON snapshot, keeping the configuration.
    #[wasm_bindgen]
    pub fn load_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.circuit = Circuit::from_json(json).map_err(to_js)?;
        Ok(())
    }

    /// Set the branch grouping strategy: `"structural"` or `"placement"`.
    #[wasm_bindgen]
    pub fn set_grouping(&mut self, grouping: &str) -> Result<(), JsValue> {
        let grouping: BranchGrouping = grouping
            .parse()
            .map_err(|message| to_js(KirchhoffError::WasmError { message }))?;
        self.config = self.config.clone().with_grouping(grouping);
        Ok(())
    }

    /// Set the row height used by placement grouping.
    #[wasm_bindgen]
    pub fn set_row_grid(&mut self, row_grid: f64) {
        self.config = self.config.clone().with_row_grid(row_grid);
    }

    /// Set whether a partly wired circuit is held at zero current.
    #[wasm_bindgen]
    pub fn set_require_connected(&mut self, require_connected: bool) {
        self.config = self.config.clone().with_require_connected(require_connected);
    }

    /// Open or close the named switch.
    #[wasm_bindgen]
    pub fn set_switch(&mut self, name: &str, closed: bool) -> Result<(), JsValue> {
        let state = if closed {
            SwitchState::Closed
        } else {
            SwitchState::Open
        };
        if self.circuit.set_switch(name, state) {
            Ok(())
        } else {
            Err(to_js(KirchhoffError::WasmError {
                message: format!("no switch named '{}'", name),
            }))
        }
    }

    /// Analyze the current circuit and return the result as JSON.
    #[wasm_bindgen]
    pub fn analyze(&self) -> Result<String, JsValue> {
        self.circuit
            .analyze_with(self.config.clone())
            .to_json()
            .map_err(to_js)
    }

    /// Validation findings for the current circuit, as a JSON array.
    #[wasm_bindgen]
    pub fn diagnostics(&self) -> Result<String, JsValue> {
        serde_json::to_string(&validate_circuit(&self.circuit))
            .map_err(|e| to_js(e.into()))
    }

    /// The current circuit as JSON.
    #[wasm_bindgen]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.circuit.to_json().map_err(to_js)
    }

    /// Number of components in the circuit.
    #[wasm_bindgen(getter)]
    pub fn component_count(&self) -> usize {
        self.circuit.components.len()
    }
}

impl WasmCircuitAnalyzer {
    fn from_circuit(circuit: Circuit) -> Self {
        Self {
            circuit,
            config: AnalyzerConfig::default(),
        }
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the default row height for placement grouping.
#[wasm_bindgen]
pub fn default_row_grid() -> f64 {
    DEFAULT_ROW_GRID
}
