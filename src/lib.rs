//! # Reaction Balancer
//!
//! Balances chemical equations with the smallest positive integer
//! stoichiometric coefficients.
//!
//! This library provides:
//! - A formula parser with nested groups, hydrates and state annotations
//! - Assembly of the element-balance coefficient matrix
//! - An exact integer balancer (rational simplex + null-space analysis)
//! - Rendering of the balanced equation
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`formula`] - Parser for single compound formulas
//! - [`equation`] - Equation splitting, matrix assembly and conservation checks
//! - [`solver`] - Integer balancing of the coefficient matrix
//! - [`render`] - Display of balanced equations
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! balance "C2H5OH + O2 -> CO2 + H2O"
//! ```
//!
//! ### Library
//!
//! ```
//! let balanced = reaction_balancer::balance("H2 + O2 -> H2O").unwrap();
//! assert_eq!(balanced.coefficients(), &[2, 1, 2]);
//! assert_eq!(balanced.to_string(), "2H2 + O2 -> 2H2O");
//! ```
//!
//! ## Balancing Method
//!
//! For an equation with compounds c_1..c_n and elements e_1..e_m:
//!
//! 1. Parse each compound into element counts
//! 2. Assemble A (m x n), reactant counts positive and product counts negative
//! 3. Solve A x = 0 with x_i >= 1, minimizing Σ x_i over the rationals
//! 4. Scale to integers and reduce to lowest terms

pub mod equation;
pub mod error;
pub mod formula;
pub mod render;
pub mod solver;

// Re-export main types for convenience
pub use equation::{CoefficientMatrix, Equation};
pub use error::{BalanceError, Result};
pub use formula::{Formula, ParseOptions};
pub use render::BalancedEquation;
pub use solver::{Balancer, BalancerConfig, DegeneracyPolicy, Normalization};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::balance_equation;

/// Separator printed between the input and the balanced equation.
pub const SEPARATOR: &str = "_______________________________";

/// Options for the full parse-assemble-solve pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceOptions {
    /// Accepted formula notations
    pub parse: ParseOptions,
    /// Solver normalization and degeneracy policy
    pub solver: BalancerConfig,
}

impl BalanceOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the formula parsing options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Set the solver configuration.
    pub fn with_solver_config(mut self, solver: BalancerConfig) -> Self {
        self.solver = solver;
        self
    }
}

/// Balance an equation with default options.
pub fn balance(text: &str) -> Result<BalancedEquation> {
    balance_with(text, &BalanceOptions::default())
}

/// Balance an equation.
pub fn balance_with(text: &str, options: &BalanceOptions) -> Result<BalancedEquation> {
    let (equation, matrix) = equation::build_with(text, &options.parse)?;
    let coefficients = Balancer::with_config(options.solver.clone()).solve(&matrix)?;
    BalancedEquation::new(equation, coefficients)
}
