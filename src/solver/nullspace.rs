//! Exact reduced row echelon form and null-space basis.

use num_rational::BigRational;
use num_traits::{One, Zero};

use super::rational::from_i64;
use crate::equation::CoefficientMatrix;

/// Reduced row echelon form of a coefficient matrix over the rationals.
#[derive(Debug, Clone)]
pub struct RowEchelon {
    /// Non-zero rows of the reduced matrix
    rows: Vec<Vec<BigRational>>,
    /// Pivot column of each row in `rows`
    pivots: Vec<usize>,
    /// Number of columns (unknowns)
    cols: usize,
}

impl RowEchelon {
    /// Reduce `matrix` with Gauss-Jordan elimination.
    pub fn new(matrix: &CoefficientMatrix) -> Self {
        let cols = matrix.cols();
        let mut rows: Vec<Vec<BigRational>> = (0..matrix.rows())
            .map(|r| matrix.row(r).iter().map(|&v| from_i64(v)).collect())
            .collect();
        let mut pivots = Vec::new();

        let mut pivot_row = 0;
        for col in 0..cols {
            if pivot_row >= rows.len() {
                break;
            }

            // Exact arithmetic: any non-zero entry is a valid pivot.
            let Some(found) = (pivot_row..rows.len()).find(|&r| !rows[r][col].is_zero()) else {
                continue;
            };
            rows.swap(pivot_row, found);

            let inv = BigRational::one() / &rows[pivot_row][col];
            for value in rows[pivot_row].iter_mut() {
                *value *= &inv;
            }

            let pivot = rows[pivot_row].clone();
            for (r, row) in rows.iter_mut().enumerate() {
                if r == pivot_row || row[col].is_zero() {
                    continue;
                }
                let factor = row[col].clone();
                for (value, p) in row.iter_mut().zip(&pivot) {
                    *value -= &factor * p;
                }
            }

            pivots.push(col);
            pivot_row += 1;
        }

        rows.truncate(pivot_row);
        Self { rows, pivots, cols }
    }

    /// Rank of the matrix.
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// Dimension of the null space.
    pub fn nullity(&self) -> usize {
        self.cols - self.rank()
    }

    /// Columns without a pivot.
    pub fn free_columns(&self) -> Vec<usize> {
        (0..self.cols).filter(|c| !self.pivots.contains(c)).collect()
    }

    /// Basis of the null space, one vector per free column.
    ///
    /// Each vector has 1 at its free column, 0 at the other free columns,
    /// and the back-substituted values at the pivot columns.
    pub fn null_space(&self) -> Vec<Vec<BigRational>> {
        self.free_columns()
            .into_iter()
            .map(|free| {
                let mut v = vec![BigRational::zero(); self.cols];
                v[free] = BigRational::one();
                for (row, &pivot) in self.rows.iter().zip(&self.pivots) {
                    v[pivot] = -row[free].clone();
                }
                v
            })
            .collect()
    }
}
