//! Main balancing interface.

use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use tracing::debug;

use super::nullspace::RowEchelon;
use super::rational::{from_i64, to_lowest_terms};
use super::simplex::{minimize, LpOutcome};
use crate::equation::{validate_conservation, CoefficientMatrix};
use crate::error::{BalanceError, Result};

/// How the scale of the homogeneous system is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Minimize the sum of coefficients subject to every coefficient >= 1.
    #[default]
    MinimumSum,
    /// Fix the coefficient of the given compound (column) to 1 and solve
    /// for the rest from the null space.
    FixColumn(usize),
}

/// What to do when the balance system has more than one independent
/// solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneracyPolicy {
    /// Report [`BalanceError::UnderDetermined`].
    #[default]
    Reject,
    /// Return the minimum-sum vertex selected by Bland's rule.
    MinimumSum,
}

/// Configuration for the balancer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalancerConfig {
    /// Scale normalization for one-dimensional null spaces.
    pub normalization: Normalization,
    /// Policy for null spaces of dimension > 1.
    pub policy: DegeneracyPolicy,
}

impl BalancerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scale normalization.
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Set the policy for under-determined systems.
    pub fn with_policy(mut self, policy: DegeneracyPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Solves coefficient matrices for minimal positive integer vectors.
#[derive(Debug, Clone, Default)]
pub struct Balancer {
    config: BalancerConfig,
}

impl Balancer {
    /// Create a balancer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a balancer with a custom configuration.
    pub fn with_config(config: BalancerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }

    /// Solve `A x = 0` for the smallest strictly positive integer `x`.
    pub fn solve(&self, matrix: &CoefficientMatrix) -> Result<Vec<u64>> {
        validate_conservation(matrix)?;

        if let Normalization::FixColumn(col) = self.config.normalization {
            if col >= matrix.cols() {
                return Err(BalanceError::invalid_config(format!(
                    "cannot fix column {} of a {}-compound equation",
                    col,
                    matrix.cols()
                )));
            }
        }

        let echelon = RowEchelon::new(matrix);
        let nullity = echelon.nullity();
        debug!(rank = echelon.rank(), nullity, "reduced balance system");

        let rational = match nullity {
            0 => {
                return Err(BalanceError::infeasible(
                    "the only solution conserving every element is all zeros",
                ));
            }
            1 => match self.config.normalization {
                Normalization::MinimumSum => minimum_sum(matrix)?,
                Normalization::FixColumn(col) => fix_column(matrix, &echelon, col)?,
            },
            dimension => match self.config.policy {
                DegeneracyPolicy::Reject => {
                    return Err(BalanceError::UnderDetermined { dimension });
                }
                DegeneracyPolicy::MinimumSum => minimum_sum(matrix)?,
            },
        };

        let coefficients = to_lowest_terms(&rational)?;
        if !matrix.is_balanced_by(&coefficients) {
            return Err(BalanceError::InvalidSolution);
        }

        debug!(?coefficients, "balanced");
        Ok(coefficients)
    }
}

/// Solve `min Σx  s.t.  A x = 0, x >= 1` via the shift `x = y + 1`.
fn minimum_sum(matrix: &CoefficientMatrix) -> Result<Vec<BigRational>> {
    let n = matrix.cols();
    let a: Vec<Vec<BigRational>> = (0..matrix.rows())
        .map(|r| matrix.row(r).iter().map(|&v| from_i64(v)).collect())
        .collect();
    // A (y + 1) = 0  =>  A y = -A 1
    let b: Vec<BigRational> = a
        .iter()
        .map(|row| -row.iter().fold(BigRational::zero(), |acc, v| acc + v))
        .collect();
    let c = vec![BigRational::one(); n];

    match minimize(&a, &b, &c) {
        LpOutcome::Optimal(y) => Ok(y.into_iter().map(|v| v + BigRational::one()).collect()),
        LpOutcome::Infeasible => Err(BalanceError::infeasible(
            "no combination with all-positive coefficients conserves every element",
        )),
        // Σy with y >= 0 is bounded below by zero.
        LpOutcome::Unbounded => Err(BalanceError::InvalidSolution),
    }
}

/// Scale the single null-space basis vector so that `x[col] = 1`.
fn fix_column(
    matrix: &CoefficientMatrix,
    echelon: &RowEchelon,
    col: usize,
) -> Result<Vec<BigRational>> {
    let basis = echelon.null_space();
    let direction = basis
        .first()
        .ok_or_else(|| BalanceError::infeasible("balance system has no non-trivial solution"))?;

    let pivot = &direction[col];
    if pivot.is_zero() {
        return Err(BalanceError::infeasible(format!(
            "compound '{}' takes coefficient zero in every balancing",
            matrix.compounds()[col]
        )));
    }

    let scaled: Vec<BigRational> = direction.iter().map(|v| v / pivot).collect();
    if let Some(idx) = scaled.iter().position(|v| !v.is_positive()) {
        return Err(BalanceError::infeasible(format!(
            "compound '{}' would need a non-positive coefficient",
            matrix.compounds()[idx]
        )));
    }
    Ok(scaled)
}
