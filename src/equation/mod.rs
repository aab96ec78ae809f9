//! Equation model and element-balance matrix.
//!
//! This module turns the text of a reaction into the [`Equation`] (ordered
//! reactant and product compounds) and the [`CoefficientMatrix`] consumed by
//! the solver.

mod matrix;
mod model;
mod validate;

pub use matrix::CoefficientMatrix;
pub use model::{Equation, Side, ARROWS};
pub use validate::validate_conservation;

use tracing::debug;

use crate::error::Result;
use crate::formula::{self, Formula, ParseOptions};

/// Build the equation model and its coefficient matrix with default
/// formula options.
pub fn build(text: &str) -> Result<(Equation, CoefficientMatrix)> {
    build_with(text, &ParseOptions::default())
}

/// Build the equation model and its coefficient matrix.
///
/// Formula errors are returned unchanged; they carry the offending compound.
pub fn build_with(text: &str, options: &ParseOptions) -> Result<(Equation, CoefficientMatrix)> {
    let equation = Equation::parse(text)?;

    let formulas = equation
        .compounds()
        .map(|(side, compound)| {
            let parsed = formula::parse_with(compound, options)?;
            debug!(%side, compound, composition = %parsed, "parsed compound");
            Ok(parsed)
        })
        .collect::<Result<Vec<Formula>>>()?;

    let matrix = CoefficientMatrix::assemble(&equation, &formulas)?;
    debug!(
        rows = matrix.rows(),
        cols = matrix.cols(),
        "assembled coefficient matrix"
    );

    Ok((equation, matrix))
}
