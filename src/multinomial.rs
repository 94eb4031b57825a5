use smallvec::SmallVec;
use snafu::prelude::*;

use crate::{ArithmeticOverflowSnafu, CoefficientError, InvalidPartitionSnafu};

/// Largest degree whose factorial is exactly representable in a `u64` (20! < 2^64 < 21!).
pub const MAX_EXACT_DEGREE: u8 = 20;

pub fn factorial(n: u8) -> Result<u64, CoefficientError> {
    let mut product = 1u64;
    for i in 2..=n as u64 {
        product = product
            .checked_mul(i)
            .context(ArithmeticOverflowSnafu { degree: n })?;
    }
    Ok(product)
}

/// Multinomial coefficient `n! / (k_1! * k_2! * ... * k_m!)`.
///
/// The parts of `partition` must sum to `n`. Each part factorial divides the running quotient
/// exactly, so the result never loses precision while `n <= MAX_EXACT_DEGREE`.
///
/// ```rust
/// use bernstein_coefficients::multinomial_coefficient;
///
/// assert_eq!(multinomial_coefficient(4, &[2, 1, 1]).unwrap(), 12);
/// assert!(multinomial_coefficient(4, &[2, 1]).is_err());
/// ```
pub fn multinomial_coefficient(n: u8, partition: &[u8]) -> Result<u64, CoefficientError> {
    let sum: u32 = partition.iter().map(|&k| k as u32).sum();
    ensure!(
        sum == n as u32,
        InvalidPartitionSnafu {
            degree: n,
            partition: SmallVec::<[u8; 4]>::from_slice(partition),
            sum,
        }
    );

    let mut coeff = factorial(n)?;
    for &k in partition {
        // k <= n, so k! cannot overflow once n! has not.
        let part = factorial(k)?;
        debug_assert_eq!(coeff % part, 0, "{n}! / {partition:?} is not exact");
        coeff /= part;
    }
    Ok(coeff)
}

/// `C(n, i)`, the multinomial coefficient of the partition `(i, n - i)`.
///
/// `i > n` is an invalid partition rather than zero.
pub fn binomial_coefficient(n: u8, i: u8) -> Result<u64, CoefficientError> {
    multinomial_coefficient(n, &[i, n.saturating_sub(i)])
}

/// Trinomial coefficient of the partition `(i, j, n - i - j)`.
pub fn trinomial_coefficient(n: u8, i: u8, j: u8) -> Result<u64, CoefficientError> {
    multinomial_coefficient(n, &[i, j, n.saturating_sub(i).saturating_sub(j)])
}

#[cfg(test)]
mod tests {
    use assertables::{assert_err, assert_ok};
    use pretty_assertions as pa;
    use rand::{SeedableRng as _, seq::SliceRandom as _};

    use super::*;

    #[test]
    fn factorial_small_test() {
        let expected = [1, 1, 2, 6, 24, 120, 720, 5040, 40320, 362880, 3628800];
        for (n, &value) in expected.iter().enumerate() {
            pa::assert_eq!(factorial(n as u8).unwrap(), value);
        }
        assert_eq!(factorial(12).unwrap(), 479_001_600);
    }

    #[test]
    fn factorial_limit_test() {
        assert_eq!(factorial(MAX_EXACT_DEGREE).unwrap(), 2_432_902_008_176_640_000);
        let err = factorial(MAX_EXACT_DEGREE + 1).unwrap_err();
        assert!(matches!(
            err,
            CoefficientError::ArithmeticOverflow { degree: 21 }
        ));
    }

    #[test]
    fn binomial_coefficient_0k_test() {
        for n in 0..=MAX_EXACT_DEGREE {
            assert_eq!(binomial_coefficient(n, 0).unwrap(), 1);
            assert_eq!(binomial_coefficient(n, n).unwrap(), 1);
        }
    }

    #[test]
    fn binomial_coefficient_symmetric_test() {
        for n in 0..=MAX_EXACT_DEGREE {
            for i in 0..=n {
                assert_eq!(
                    binomial_coefficient(n, i).unwrap(),
                    binomial_coefficient(n, n - i).unwrap()
                );
            }
        }
    }

    #[test]
    fn binomial_coefficient_1k_test() {
        for n in 1..=MAX_EXACT_DEGREE {
            assert_eq!(binomial_coefficient(n, 1).unwrap(), n as u64);
        }
    }

    #[test]
    fn binomial_coefficient_general_test() {
        assert_eq!(binomial_coefficient(5, 2).unwrap(), 10);
        assert_eq!(binomial_coefficient(10, 3).unwrap(), 120);
        assert_eq!(binomial_coefficient(6, 4).unwrap(), 15);
        assert_eq!(binomial_coefficient(12, 6).unwrap(), 924);
        assert_eq!(binomial_coefficient(20, 10).unwrap(), 184_756);
    }

    #[test]
    fn binomial_coefficient_out_of_range_test() {
        let err = binomial_coefficient(3, 4).unwrap_err();
        assert!(matches!(
            err,
            CoefficientError::InvalidPartition {
                degree: 3,
                sum: 4,
                ..
            }
        ));
    }

    #[test]
    fn trinomial_coefficient_general_test() {
        assert_eq!(trinomial_coefficient(2, 0, 1).unwrap(), 2);
        assert_eq!(trinomial_coefficient(2, 1, 1).unwrap(), 2);
        assert_eq!(trinomial_coefficient(3, 1, 1).unwrap(), 6);
        assert_eq!(trinomial_coefficient(12, 4, 4).unwrap(), 34650);
        assert_err!(trinomial_coefficient(2, 2, 1));
    }

    #[test]
    fn multinomial_invalid_partition_test() {
        let err = multinomial_coefficient(5, &[1, 2, 3]).unwrap_err();
        match err {
            CoefficientError::InvalidPartition {
                degree,
                partition,
                sum,
            } => {
                assert_eq!(degree, 5);
                pa::assert_eq!(partition.as_slice(), &[1, 2, 3]);
                assert_eq!(sum, 6);
            }
            other => panic!("expected InvalidPartition, got {other:?}"),
        }
        assert_err!(multinomial_coefficient(1, &[]));
    }

    #[test]
    fn multinomial_degenerate_partitions_test() {
        assert_ok!(multinomial_coefficient(0, &[]));
        assert_eq!(multinomial_coefficient(0, &[0, 0, 0]).unwrap(), 1);
        assert_eq!(multinomial_coefficient(7, &[7]).unwrap(), 1);
        assert_eq!(multinomial_coefficient(4, &[1, 1, 1, 1]).unwrap(), 24);
    }

    #[test]
    fn multinomial_overflow_test() {
        let err = multinomial_coefficient(21, &[21]).unwrap_err();
        assert!(matches!(err, CoefficientError::ArithmeticOverflow { .. }));
    }

    #[test]
    fn multinomial_permutation_invariant_test() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(0x5eed);
        for n in 0..=MAX_EXACT_DEGREE {
            for i in 0..=n {
                for j in 0..=(n - i) {
                    let mut parts = [i, j, n - i - j];
                    let expected = multinomial_coefficient(n, &parts).unwrap();
                    parts.shuffle(&mut rng);
                    assert_eq!(multinomial_coefficient(n, &parts).unwrap(), expected);
                }
            }
        }
    }

    #[test]
    fn multinomial_matches_binomial_product_test() {
        // (i, j, k) splits into C(n, i) * C(n - i, j).
        for n in 0..=MAX_EXACT_DEGREE {
            for i in 0..=n {
                for j in 0..=(n - i) {
                    let expected = binomial_coefficient(n, i).unwrap()
                        * binomial_coefficient(n - i, j).unwrap();
                    assert_eq!(trinomial_coefficient(n, i, j).unwrap(), expected);
                }
            }
        }
    }
}
