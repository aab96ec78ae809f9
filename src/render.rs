//! Rendering of balanced equations.

use std::fmt;

use crate::equation::Equation;
use crate::error::{BalanceError, Result};

/// An equation together with its balancing coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancedEquation {
    equation: Equation,
    coefficients: Vec<u64>,
}

impl BalancedEquation {
    /// Pair an equation with one coefficient per compound, in column order.
    ///
    /// A vector of the wrong length is a [`BalanceError::InvalidSolution`].
    pub fn new(equation: Equation, coefficients: Vec<u64>) -> Result<Self> {
        if coefficients.len() != equation.compound_count() {
            return Err(BalanceError::InvalidSolution);
        }
        Ok(Self {
            equation,
            coefficients,
        })
    }

    pub fn equation(&self) -> &Equation {
        &self.equation
    }

    /// Coefficients in column order (reactants first).
    pub fn coefficients(&self) -> &[u64] {
        &self.coefficients
    }

    /// `(coefficient, compound)` pairs for the reactants.
    pub fn reactant_terms(&self) -> impl Iterator<Item = (u64, &str)> {
        self.coefficients
            .iter()
            .copied()
            .zip(self.equation.reactants().iter().map(String::as_str))
    }

    /// `(coefficient, compound)` pairs for the products.
    pub fn product_terms(&self) -> impl Iterator<Item = (u64, &str)> {
        self.coefficients[self.equation.reactants().len()..]
            .iter()
            .copied()
            .zip(self.equation.products().iter().map(String::as_str))
    }

    /// Coefficient of the first compound written exactly as `compound`.
    pub fn coefficient_of(&self, compound: &str) -> Option<u64> {
        self.equation
            .compounds()
            .position(|(_, c)| c == compound)
            .map(|idx| self.coefficients[idx])
    }
}

fn write_side<'a>(
    f: &mut fmt::Formatter<'_>,
    terms: impl Iterator<Item = (u64, &'a str)>,
) -> fmt::Result {
    for (idx, (coefficient, compound)) in terms.enumerate() {
        if idx > 0 {
            write!(f, " + ")?;
        }
        if coefficient != 1 {
            write!(f, "{}", coefficient)?;
        }
        write!(f, "{}", compound)?;
    }
    Ok(())
}

impl fmt::Display for BalancedEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_side(f, self.reactant_terms())?;
        write!(f, " {} ", self.equation.arrow())?;
        write_side(f, self.product_terms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_omits_unit_coefficients() {
        let eq = Equation::parse("C2H5OH + O2 -> CO2 + H2O").unwrap();
        let balanced = BalancedEquation::new(eq, vec![1, 3, 2, 3]).unwrap();
        assert_eq!(balanced.to_string(), "C2H5OH + 3O2 -> 2CO2 + 3H2O");
    }

    #[test]
    fn test_render_keeps_arrow_and_normalizes_spacing() {
        let eq = Equation::parse("H2+O2⇌H2O").unwrap();
        let balanced = BalancedEquation::new(eq, vec![2, 1, 2]).unwrap();
        assert_eq!(balanced.to_string(), "2H2 + O2 ⇌ 2H2O");
    }

    #[test]
    fn test_terms_and_lookup() {
        let eq = Equation::parse("H2 + O2 -> H2O").unwrap();
        let balanced = BalancedEquation::new(eq, vec![2, 1, 2]).unwrap();
        let reactants: Vec<(u64, &str)> = balanced.reactant_terms().collect();
        assert_eq!(reactants, vec![(2, "H2"), (1, "O2")]);
        let products: Vec<(u64, &str)> = balanced.product_terms().collect();
        assert_eq!(products, vec![(2, "H2O")]);
        assert_eq!(balanced.coefficient_of("O2"), Some(1));
        assert_eq!(balanced.coefficient_of("N2"), None);
    }

    #[test]
    fn test_length_mismatch() {
        let eq = Equation::parse("H2 + O2 -> H2O").unwrap();
        assert_eq!(
            BalancedEquation::new(eq, vec![2, 1]).unwrap_err(),
            BalanceError::InvalidSolution
        );
    }
}
