//! Exact rational helpers and conversion to lowest-terms integers.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{BalanceError, Result};

/// Lift an integer matrix entry into an exact rational.
pub fn from_i64(value: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(value))
}

/// Scale a positive rational vector to the smallest integer vector with the
/// same direction.
///
/// Multiplies by the LCM of all denominators, then divides by the GCD of
/// the resulting numerators. Every entry must be strictly positive.
pub fn to_lowest_terms(values: &[BigRational]) -> Result<Vec<u64>> {
    if values.is_empty() {
        return Err(BalanceError::invalid_config("empty solution vector"));
    }
    if let Some(idx) = values.iter().position(|v| !v.is_positive()) {
        return Err(BalanceError::infeasible(format!(
            "coefficient {} of the solution is not positive",
            idx + 1
        )));
    }

    let lcm = values
        .iter()
        .fold(BigInt::one(), |acc, v| acc.lcm(v.denom()));

    let scaled: Vec<BigInt> = values
        .iter()
        .map(|v| v.numer() * (&lcm / v.denom()))
        .collect();

    let gcd = scaled.iter().fold(BigInt::zero(), |acc, v| acc.gcd(v));

    scaled
        .iter()
        .map(|v| (v / &gcd).to_u64().ok_or(BalanceError::CoefficientOverflow))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_lowest_terms_from_fractions() {
        let v = vec![ratio(1, 1), ratio(1, 2), ratio(1, 1)];
        assert_eq!(to_lowest_terms(&v).unwrap(), vec![2, 1, 2]);
    }

    #[test]
    fn test_lowest_terms_divides_common_factor() {
        let v = vec![ratio(4, 1), ratio(6, 1), ratio(10, 1)];
        assert_eq!(to_lowest_terms(&v).unwrap(), vec![2, 3, 5]);
    }

    #[test]
    fn test_mixed_denominators() {
        let v = vec![ratio(2, 3), ratio(3, 4), ratio(5, 6)];
        assert_eq!(to_lowest_terms(&v).unwrap(), vec![8, 9, 10]);
    }

    #[test]
    fn test_rejects_non_positive() {
        let v = vec![ratio(1, 1), ratio(0, 1)];
        assert!(matches!(
            to_lowest_terms(&v),
            Err(BalanceError::Infeasible { .. })
        ));
        let v = vec![ratio(1, 1), ratio(-1, 3)];
        assert!(to_lowest_terms(&v).is_err());
    }

    #[test]
    fn test_overflow() {
        let big = BigRational::from_integer(BigInt::from(u64::MAX) * BigInt::from(3));
        let v = vec![big, ratio(1, 1)];
        assert_eq!(to_lowest_terms(&v), Err(BalanceError::CoefficientOverflow));
    }
}
