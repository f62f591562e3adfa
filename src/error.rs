//! Error types for registration, lookup and unit execution.

use thiserror::Error;

/// Errors raised by [`UnitRegistry`](crate::registry::UnitRegistry) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unit name must not be empty")]
    EmptyName,

    #[error("unit '{0}' is already registered")]
    DuplicateName(String),

    #[error("no unit registered under '{0}'")]
    NotFound(String),

    /// The factory produced a unit reporting a different name than its key.
    #[error("factory for '{expected}' produced unit named '{actual}'")]
    NameMismatch { expected: String, actual: String },
}

/// Errors raised by [`Unit`](crate::unit::Unit) implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("input buffer too small: expected at least {expected}, got {actual}")]
    InputSize { expected: usize, actual: usize },

    #[error("output buffer too small: expected at least {expected}, got {actual}")]
    OutputSize { expected: usize, actual: usize },

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("parameter '{0}' has an unexpected type")]
    ParameterType(String),

    #[error("execution failed: {0}")]
    Execution(String),
}
