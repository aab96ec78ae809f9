//! Integer balancer for the element-balance system.
//!
//! ## Formulation
//!
//! The coefficient matrix A encodes "reactants minus products" for every
//! element, so a balanced equation is a vector x with
//!
//! ```text
//! A x = 0,   x_i >= 1,   x_i integer
//! ```
//!
//! The system is homogeneous, so one scale has to be fixed. By default the
//! balancer solves the linear program
//!
//! ```text
//! minimize   Σ x_i
//! subject to A x = 0
//!            x_i >= 1
//! ```
//!
//! with an exact simplex, which needs no guess about which compound can be
//! pinned and rejects equations whose only balancings have a zero or
//! negative coefficient. The rational optimum is then multiplied by the LCM
//! of its denominators and divided by the GCD of its entries.
//!
//! The rank of A (exact Gauss-Jordan elimination) decides uniqueness: a
//! null space of dimension 0 means only the zero vector balances, dimension
//! 1 gives a unique answer up to scale, and larger dimensions are handled
//! by [`DegeneracyPolicy`].

mod balancer;
mod nullspace;
mod rational;
mod simplex;

pub use balancer::{Balancer, BalancerConfig, DegeneracyPolicy, Normalization};
pub use nullspace::RowEchelon;
pub use rational::to_lowest_terms;
pub use simplex::{minimize, LpOutcome};

use crate::equation::CoefficientMatrix;
use crate::error::Result;

/// Solve a coefficient matrix with the default configuration.
pub fn solve(matrix: &CoefficientMatrix) -> Result<Vec<u64>> {
    Balancer::new().solve(matrix)
}
