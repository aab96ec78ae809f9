//! Error types for the reaction balancer.
//!
//! This module provides a unified error type [`BalanceError`] that covers
//! all error conditions that can occur during formula parsing, equation
//! assembly, and solving of the element-balance system.

use thiserror::Error;

/// Result type alias using [`BalanceError`].
pub type Result<T> = std::result::Result<T, BalanceError>;

/// Unified error type for all balancing operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BalanceError {
    // ============ Formula Errors ============
    /// A compound formula could not be parsed.
    ///
    /// `position` is the 0-indexed character offset inside `formula`.
    #[error("Parse error in '{formula}' at position {position}: {message}")]
    Parse {
        formula: String,
        position: usize,
        message: String,
    },

    // ============ Equation Errors ============
    /// The equation text is not of the form `<side> <arrow> <side>`.
    #[error("Malformed equation: {message}")]
    EquationFormat { message: String },

    // ============ Solver Errors ============
    /// No all-positive solution conserves every element.
    #[error("Equation cannot be balanced: {reason}")]
    Infeasible { reason: String },

    /// The balance system admits several independent solutions.
    #[error("Equation has {dimension} independent balancing solutions; refusing to pick one")]
    UnderDetermined { dimension: usize },

    /// Solver configuration does not fit the matrix.
    #[error("Invalid solver configuration: {message}")]
    InvalidConfig { message: String },

    /// A coefficient does not fit in 64 bits.
    #[error("Balanced coefficients exceed the supported integer range")]
    CoefficientOverflow,

    /// The computed vector does not conserve every element.
    #[error("Computed coefficients do not balance the equation")]
    InvalidSolution,
}

impl BalanceError {
    /// Create a formula parse error
    pub fn parse(formula: impl Into<String>, position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            formula: formula.into(),
            position,
            message: message.into(),
        }
    }

    /// Create an equation format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::EquationFormat {
            message: message.into(),
        }
    }

    /// Create an infeasibility error
    pub fn infeasible(reason: impl Into<String>) -> Self {
        Self::Infeasible {
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Report a parse error against `formula` instead of the text that was
    /// tokenized. Other errors are returned unchanged.
    pub(crate) fn in_formula(self, formula: &str) -> Self {
        match self {
            Self::Parse {
                position, message, ..
            } => Self::parse(formula, position, message),
            other => other,
        }
    }

    /// Whether this error was raised while parsing a single compound.
    pub fn is_formula_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
