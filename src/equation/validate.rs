//! Conservation checks run before solving.

use crate::error::{BalanceError, Result};

use super::CoefficientMatrix;

/// Validate that the element-balance system can have a positive solution.
///
/// Checks:
/// - Every compound contains at least one element
/// - Every element appears on both sides of the arrow
pub fn validate_conservation(matrix: &CoefficientMatrix) -> Result<()> {
    if matrix.cols() == 0 {
        return Err(BalanceError::invalid_config("equation has no compounds"));
    }

    for col in 0..matrix.cols() {
        if matrix.column(col).iter().all(|v| *v == 0) {
            return Err(BalanceError::infeasible(format!(
                "compound '{}' contains no elements",
                matrix.compounds()[col]
            )));
        }
    }

    for (row, element) in matrix.elements().iter().enumerate() {
        let entries = matrix.row(row);
        let in_reactants = entries.iter().any(|v| *v > 0);
        let in_products = entries.iter().any(|v| *v < 0);
        match (in_reactants, in_products) {
            (true, false) => {
                return Err(BalanceError::infeasible(format!(
                    "element '{}' appears only in the reactants",
                    element
                )));
            }
            (false, true) => {
                return Err(BalanceError::infeasible(format!(
                    "element '{}' appears only in the products",
                    element
                )));
            }
            _ => {}
        }
    }

    Ok(())
}
