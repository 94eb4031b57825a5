//! Precomputed multinomial coefficient tables for Bernstein-basis evaluation.
//!
//! Bézier curves of degree `n` weight their control points by `C(n, i)`, and triangular Bézier
//! patches by the trinomial coefficient of a barycentric index `(i, j, k)` with `i + j + k = n`.
//! This crate builds both families of coefficients for every degree up to a maximum `N` as
//! dense, fixed-stride tables:
//!
//! - [`binomial_table`]: `(N+1) x (N+1)`, indexed by `[n][i]`.
//! - [`trinomial_table`]: `(N+1) x (N+1) x (N+1)`, indexed by `[n][i][j]`.
//!
//! Cells outside the valid index range are zero so every row has the same width. The [`emit`]
//! module renders finished tables as source literals.
//!
//! ```rust
//! use bernstein_coefficients::binomial_table;
//!
//! let table = binomial_table(4).unwrap();
//! assert_eq!(table.row(&[3]), Some(&[1, 3, 3, 1, 0][..]));
//! ```

pub mod emit;
mod generate;
mod multinomial;
mod table;

#[cfg(test)]
mod test_utils;

pub use generate::*;
pub use multinomial::*;
pub use table::*;

use smallvec::SmallVec;
use snafu::prelude::*;

/// Maximum degree of the tables shipped with the curve and surface renderers.
pub const DEFAULT_MAX_DEGREE: u8 = 12;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CoefficientError {
    #[snafu(display(
        "Partition {:?} sums to {} but the degree is {}",
        partition,
        sum,
        degree
    ))]
    InvalidPartition {
        degree: u8,
        partition: SmallVec<[u8; 4]>,
        sum: u32,
    },

    #[snafu(display(
        "{}! does not fit in a u64; exact coefficients are limited to degree {}",
        degree,
        MAX_EXACT_DEGREE
    ))]
    ArithmeticOverflow { degree: u8 },
}
