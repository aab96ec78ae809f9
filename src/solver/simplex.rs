//! Exact two-phase simplex for `min c·y  s.t.  A y = b, y >= 0`.
//!
//! All arithmetic is over `BigRational`, so there is no tolerance to tune.
//! Bland's rule picks entering and leaving variables, which rules out
//! cycling on the degenerate vertices that homogeneous balance systems
//! produce.

use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use tracing::trace;

/// Outcome of a linear program.
#[derive(Debug, Clone, PartialEq)]
pub enum LpOutcome {
    /// Optimal point found
    Optimal(Vec<BigRational>),
    /// No point satisfies the constraints
    Infeasible,
    /// The objective decreases without bound
    Unbounded,
}

/// Dense simplex tableau.
struct Tableau {
    /// Constraint rows; the last entry of each row is the right-hand side
    rows: Vec<Vec<BigRational>>,
    /// Reduced costs; the last entry is the negated objective value
    cost: Vec<BigRational>,
    /// Basic variable of each row
    basis: Vec<usize>,
    /// Number of structural variables
    num_vars: usize,
}

impl Tableau {
    fn rhs_col(&self) -> usize {
        self.cost.len() - 1
    }

    /// Pivot on (row, col), making `col` basic in `row`.
    fn pivot(&mut self, row: usize, col: usize) {
        trace!(row, col, leaving = self.basis[row], "simplex pivot");

        let inv = BigRational::one() / &self.rows[row][col];
        for value in self.rows[row].iter_mut() {
            *value *= &inv;
        }

        let pivot_row = self.rows[row].clone();
        for (r, other) in self.rows.iter_mut().enumerate() {
            if r != row && !other[col].is_zero() {
                eliminate(other, &pivot_row, col);
            }
        }
        if !self.cost[col].is_zero() {
            eliminate(&mut self.cost, &pivot_row, col);
        }

        self.basis[row] = col;
    }

    /// Run simplex iterations over columns `0..limit`.
    ///
    /// Returns `false` if the objective is unbounded.
    fn optimize(&mut self, limit: usize) -> bool {
        loop {
            // Bland: lowest-index column with negative reduced cost.
            let Some(col) = (0..limit).find(|&j| self.cost[j].is_negative()) else {
                return true;
            };

            let rhs = self.rhs_col();
            let mut leaving: Option<(usize, BigRational)> = None;
            for (r, row) in self.rows.iter().enumerate() {
                if !row[col].is_positive() {
                    continue;
                }
                let ratio = &row[rhs] / &row[col];
                let better = match &leaving {
                    None => true,
                    Some((best_row, best)) => {
                        ratio < *best || (ratio == *best && self.basis[r] < self.basis[*best_row])
                    }
                };
                if better {
                    leaving = Some((r, ratio));
                }
            }

            match leaving {
                Some((row, _)) => self.pivot(row, col),
                None => return false,
            }
        }
    }

    /// Values of the structural variables at the current basis.
    fn solution(&self) -> Vec<BigRational> {
        let rhs = self.rhs_col();
        let mut y = vec![BigRational::zero(); self.num_vars];
        for (row, &var) in self.rows.iter().zip(&self.basis) {
            if var < self.num_vars {
                y[var] = row[rhs].clone();
            }
        }
        y
    }
}

/// `target -= target[col] * pivot_row`
fn eliminate(target: &mut [BigRational], pivot_row: &[BigRational], col: usize) {
    let factor = target[col].clone();
    for (value, p) in target.iter_mut().zip(pivot_row) {
        *value -= &factor * p;
    }
}

/// Minimize `c·y` subject to `A y = b` and `y >= 0`.
///
/// `a` has one row per constraint; every row must have `c.len()` entries.
pub fn minimize(a: &[Vec<BigRational>], b: &[BigRational], c: &[BigRational]) -> LpOutcome {
    let n = c.len();
    let m = a.len();
    debug_assert_eq!(b.len(), m);

    // Phase 1 tableau: structural columns, one artificial per row, rhs.
    let width = n + m + 1;
    let mut rows = Vec::with_capacity(m);
    for (i, (row, rhs)) in a.iter().zip(b).enumerate() {
        debug_assert_eq!(row.len(), n);
        let flip = rhs.is_negative();
        let mut t = vec![BigRational::zero(); width];
        for (j, value) in row.iter().enumerate() {
            t[j] = if flip { -value.clone() } else { value.clone() };
        }
        t[n + i] = BigRational::one();
        t[width - 1] = if flip { -rhs.clone() } else { rhs.clone() };
        rows.push(t);
    }

    // Phase 1 reduced costs: minimize the sum of artificials.
    let mut cost = vec![BigRational::zero(); width];
    for row in &rows {
        for j in 0..n {
            cost[j] -= &row[j];
        }
        cost[width - 1] -= &row[width - 1];
    }

    let mut tableau = Tableau {
        rows,
        cost,
        basis: (n..n + m).collect(),
        num_vars: n,
    };

    tableau.optimize(n);

    let rhs = tableau.rhs_col();
    if !tableau.cost[rhs].is_zero() {
        trace!(residual = %(-tableau.cost[rhs].clone()), "phase 1 left artificials positive");
        return LpOutcome::Infeasible;
    }

    // Drive remaining (zero-valued) artificials out of the basis; rows where
    // that is impossible are linearly dependent and are dropped.
    let mut r = 0;
    while r < tableau.rows.len() {
        if tableau.basis[r] >= n {
            match (0..n).find(|&j| !tableau.rows[r][j].is_zero()) {
                Some(col) => tableau.pivot(r, col),
                None => {
                    tableau.rows.remove(r);
                    tableau.basis.remove(r);
                    continue;
                }
            }
        }
        r += 1;
    }

    // Phase 2 reduced costs: c_j - c_B B^-1 A_j. Artificial columns are
    // never allowed to re-enter, so their entries are irrelevant.
    let mut cost = vec![BigRational::zero(); width];
    cost[..n].clone_from_slice(c);
    for (row, &var) in tableau.rows.iter().zip(&tableau.basis) {
        let cb = &c[var];
        if cb.is_zero() {
            continue;
        }
        for (value, entry) in cost.iter_mut().zip(row) {
            *value -= cb * entry;
        }
    }
    tableau.cost = cost;

    if !tableau.optimize(n) {
        return LpOutcome::Unbounded;
    }

    LpOutcome::Optimal(tableau.solution())
}
