//! Element-balance coefficient matrix assembly.

use std::fmt;

use super::model::{Equation, Side};
use crate::error::{BalanceError, Result};
use crate::formula::Formula;

/// Element-balance system `A x = 0`.
///
/// One row per element, one column per compound (reactants first). Entries
/// are atom counts, negated for products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoefficientMatrix {
    /// System matrix A (row-major)
    a: Vec<i64>,
    /// Row labels (element symbols)
    elements: Vec<String>,
    /// Column labels (compound formulas)
    compounds: Vec<String>,
    /// Number of leading reactant columns
    reactant_count: usize,
}

impl CoefficientMatrix {
    /// Assemble the matrix from an equation and the parsed formula of each
    /// compound, given in column order.
    pub fn assemble(equation: &Equation, formulas: &[Formula]) -> Result<Self> {
        if formulas.len() != equation.compound_count() {
            return Err(BalanceError::invalid_config(format!(
                "expected {} formulas, got {}",
                equation.compound_count(),
                formulas.len()
            )));
        }

        // Row order: first-seen element, scanning reactants then products.
        let mut elements: Vec<String> = Vec::new();
        for formula in formulas {
            for symbol in formula.elements() {
                if !elements.iter().any(|e| e == symbol) {
                    elements.push(symbol.to_string());
                }
            }
        }

        let cols = formulas.len();
        let mut matrix = Self {
            a: vec![0; elements.len() * cols],
            elements,
            compounds: equation.compounds().map(|(_, c)| c.to_string()).collect(),
            reactant_count: equation.reactants().len(),
        };

        for (col, ((side, compound), formula)) in equation.compounds().zip(formulas).enumerate() {
            for (symbol, count) in formula.iter() {
                let row = matrix.row_of(symbol).unwrap_or_default();
                let count = i64::try_from(count)
                    .map_err(|_| BalanceError::parse(compound, 0, "atom count too large"))?;
                let value = match side {
                    Side::Reactants => count,
                    Side::Products => -count,
                };
                matrix.set(row, col, value);
            }
        }

        Ok(matrix)
    }

    /// Build a matrix directly from rows, e.g. for solver experiments.
    ///
    /// `reactant_count` columns are treated as reactants for diagnostics.
    pub fn from_rows(
        elements: Vec<String>,
        compounds: Vec<String>,
        rows: Vec<Vec<i64>>,
        reactant_count: usize,
    ) -> Result<Self> {
        if rows.len() != elements.len() {
            return Err(BalanceError::invalid_config(format!(
                "{} rows but {} element labels",
                rows.len(),
                elements.len()
            )));
        }
        let cols = compounds.len();
        if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
            return Err(BalanceError::invalid_config(format!(
                "row {} has {} entries, expected {}",
                bad,
                rows[bad].len(),
                cols
            )));
        }
        if reactant_count > cols {
            return Err(BalanceError::invalid_config(
                "reactant count exceeds number of compounds",
            ));
        }

        Ok(Self {
            a: rows.into_iter().flatten().collect(),
            elements,
            compounds,
            reactant_count,
        })
    }

    /// Number of rows (distinct elements).
    pub fn rows(&self) -> usize {
        self.elements.len()
    }

    /// Number of columns (compounds).
    pub fn cols(&self) -> usize {
        self.compounds.len()
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.a[row * self.cols() + col]
    }

    /// Set matrix element at (row, col).
    fn set(&mut self, row: usize, col: usize, value: i64) {
        let cols = self.cols();
        self.a[row * cols + col] = value;
    }

    /// Row labels in row order.
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Column labels in column order.
    pub fn compounds(&self) -> &[String] {
        &self.compounds
    }

    /// Number of leading reactant columns.
    pub fn reactant_count(&self) -> usize {
        self.reactant_count
    }

    /// Row index of an element symbol.
    pub fn row_of(&self, symbol: &str) -> Option<usize> {
        self.elements.iter().position(|e| e == symbol)
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[i64] {
        let cols = self.cols();
        &self.a[row * cols..(row + 1) * cols]
    }

    /// One column as a vector.
    pub fn column(&self, col: usize) -> Vec<i64> {
        (0..self.rows()).map(|row| self.get(row, col)).collect()
    }

    /// Per-element imbalance `A x` of a candidate coefficient vector.
    ///
    /// `None` if `coefficients` does not have one entry per column or a row
    /// sum leaves the `i128` range.
    pub fn residual(&self, coefficients: &[u64]) -> Option<Vec<i128>> {
        if coefficients.len() != self.cols() {
            return None;
        }
        (0..self.rows())
            .map(|row| {
                self.row(row)
                    .iter()
                    .zip(coefficients)
                    .try_fold(0i128, |acc, (&a, &x)| {
                        i128::from(a)
                            .checked_mul(i128::from(x))
                            .and_then(|term| acc.checked_add(term))
                    })
            })
            .collect()
    }

    /// Whether `coefficients` conserves every element.
    pub fn is_balanced_by(&self, coefficients: &[u64]) -> bool {
        self.residual(coefficients)
            .is_some_and(|residual| residual.iter().all(|r| *r == 0))
    }
}

impl fmt::Display for CoefficientMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self.elements.iter().map(|e| e.len()).max().unwrap_or(0).max(2);
        let widths: Vec<usize> = (0..self.cols())
            .map(|col| {
                let values = self.column(col).iter().map(|v| v.to_string().len()).max().unwrap_or(1);
                values.max(self.compounds[col].chars().count())
            })
            .collect();

        write!(f, "{:label_width$}", "")?;
        for (compound, width) in self.compounds.iter().zip(&widths) {
            write!(f, "  {:>width$}", compound, width = width)?;
        }
        writeln!(f)?;

        for row in 0..self.rows() {
            write!(f, "{:label_width$}", self.elements[row])?;
            for (value, width) in self.row(row).iter().zip(&widths) {
                write!(f, "  {:>width$}", value, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula;

    fn assemble(text: &str) -> CoefficientMatrix {
        let eq = Equation::parse(text).unwrap();
        let formulas: Vec<Formula> = eq
            .compounds()
            .map(|(_, c)| formula::parse(c).unwrap())
            .collect();
        CoefficientMatrix::assemble(&eq, &formulas).unwrap()
    }

    #[test]
    fn test_water_matrix() {
        let m = assemble("H2 + O2 -> H2O");
        assert_eq!(m.elements(), &["H".to_string(), "O".to_string()]);
        assert_eq!(m.row(0), &[2, 0, -2]);
        assert_eq!(m.row(1), &[0, 2, -1]);
        assert_eq!(m.reactant_count(), 2);
    }

    #[test]
    fn test_ethanol_matrix() {
        let m = assemble("C2H5OH + O2 -> CO2 + H2O");
        assert_eq!(m.elements(), &["C".to_string(), "H".to_string(), "O".to_string()]);
        assert_eq!(m.row(0), &[2, 0, -1, 0]);
        assert_eq!(m.row(1), &[6, 0, 0, -2]);
        assert_eq!(m.row(2), &[1, 2, -2, -1]);
        assert_eq!(m.column(3), vec![0, -2, -1]);
    }

    #[test]
    fn test_residual() {
        let m = assemble("H2 + O2 -> H2O");
        assert_eq!(m.residual(&[1, 1, 1]), Some(vec![0, 1]));
        assert!(m.is_balanced_by(&[2, 1, 2]));
        assert_eq!(m.residual(&[2, 1]), None);
        assert!(!m.is_balanced_by(&[2, 1]));
    }

    #[test]
    fn test_residual_overflow_is_none() {
        let m = CoefficientMatrix::from_rows(
            vec!["H".into()],
            vec!["A".into(), "B".into(), "C".into()],
            vec![vec![i64::MAX, i64::MAX, -1]],
            2,
        )
        .unwrap();
        assert_eq!(m.residual(&[u64::MAX, u64::MAX, 1]), None);
        assert!(!m.is_balanced_by(&[u64::MAX, u64::MAX, 1]));
    }

    #[test]
    fn test_large_counts_assemble() {
        let m = assemble("H9223372036854775807O + H9223372036854775807 -> HO");
        assert_eq!(m.row(0), &[i64::MAX, i64::MAX, -1]);
    }

    #[test]
    fn test_from_rows_validates_shape() {
        let err = CoefficientMatrix::from_rows(
            vec!["H".into()],
            vec!["A".into(), "B".into()],
            vec![vec![1]],
            1,
        )
        .unwrap_err();
        assert!(matches!(err, BalanceError::InvalidConfig { .. }));
    }

    #[test]
    fn test_display() {
        let m = assemble("H2 + O2 -> H2O");
        let text = m.to_string();
        assert_eq!(text, "    H2  O2  H2O\nH    2   0   -2\nO    0   2   -1\n");
    }
}
