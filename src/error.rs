//! Error types for the Kirchhoff circuit analyzer.
//!
//! This module provides a unified error type [`KirchhoffError`] for the parts
//! of the crate that can fail: reading and parsing netlists, resolving
//! component names into a [`Circuit`](crate::Circuit), and the host adapters.
//! The analyzer itself is total and never returns an error.

use thiserror::Error;

/// Result type alias using [`KirchhoffError`].
pub type Result<T> = std::result::Result<T, KirchhoffError>;

/// Unified error type for all Kirchhoff operations.
#[derive(Error, Debug)]
pub enum KirchhoffError {
    // ============ Netlist Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Invalid component definition
    #[error("Invalid component '{name}' at line {line}: {message}")]
    InvalidComponent {
        name: String,
        line: usize,
        message: String,
    },

    /// Unknown component type keyword
    #[error("Unknown component type '{component_type}' at line {line}")]
    UnknownComponentType { component_type: String, line: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{param}' for component '{component}': {message}")]
    InvalidParameter {
        component: String,
        param: String,
        message: String,
    },

    // ============ Circuit Construction Errors ============
    /// Duplicate component name
    #[error("Duplicate component name '{name}' at line {line}")]
    DuplicateComponent { name: String, line: usize },

    /// A terminal reference names a component that was never declared
    #[error("Unknown component '{name}' referenced at line {line}")]
    UnknownComponent { name: String, line: usize },

    /// A terminal reference is not of the form `<component>.a` or `<component>.b`
    #[error("Invalid terminal reference '{reference}' at line {line} (expected '<name>.a' or '<name>.b')")]
    InvalidTerminal { reference: String, line: usize },

    // ============ I/O Errors ============
    /// Error reading circuit file
    #[error("Failed to read circuit file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a report
    #[error("Failed to write report: {message}")]
    ReportWriteError { message: String },

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl KirchhoffError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid component error
    pub fn invalid_component(name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidComponent {
            name: name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(
        component: impl Into<String>,
        param: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            component: component.into(),
            param: param.into(),
            message: message.into(),
        }
    }
}
