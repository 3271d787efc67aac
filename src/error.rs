//! Error types for the astable component search.
//!
//! This module provides a unified error type [`SearchError`] that covers
//! configuration validation, timing-model inputs and the empty-result
//! outcome of a full enumeration.

use thiserror::Error;

/// Result type alias using [`SearchError`].
pub type Result<T> = std::result::Result<T, SearchError>;

/// Unified error type for all search operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    // ============ Search Errors ============
    /// No catalog combination satisfied every constraint
    #[error("No feasible component combination found ({evaluated} candidates evaluated)")]
    NoSolution { evaluated: usize },

    /// A catalog handed to the enumerator has no values
    #[error("The {catalog} catalog is empty")]
    EmptyCatalog { catalog: &'static str },

    // ============ Model Errors ============
    /// A natural-log argument of the timing model is not strictly positive
    #[error("Invalid log argument {value} for the {corner} corner of the {stage} stage")]
    InvalidLogArgument {
        stage: &'static str,
        corner: &'static str,
        value: f64,
    },

    // ============ Configuration Errors ============
    /// Invalid configuration constant
    #[error("Invalid configuration parameter '{param}': {message}")]
    InvalidConfig { param: String, message: String },

    /// A value string could not be parsed as a number with unit suffix
    #[error("Invalid value '{text}' (expected a number with optional p/n/u/m/k/M/G suffix)")]
    InvalidValue { text: String },

    // ============ Output Errors ============
    /// Report could not be serialised
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl SearchError {
    /// Create an invalid configuration error
    pub fn invalid_config(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(text: impl Into<String>) -> Self {
        Self::InvalidValue { text: text.into() }
    }
}
