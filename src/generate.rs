use snafu::prelude::*;

use crate::{
    ArithmeticOverflowSnafu, BinomialTable, CoefficientError, CoefficientTable, MAX_EXACT_DEGREE,
    TrinomialTable, binomial_coefficient, trinomial_coefficient,
};

/// Both tables for one maximum degree, produced by a single generation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoefficientTables {
    pub binomial: BinomialTable,
    pub trinomial: TrinomialTable,
}

pub fn generate_tables(max_degree: u8) -> Result<CoefficientTables, CoefficientError> {
    let binomial = binomial_table(max_degree)?;
    let trinomial = trinomial_table(max_degree)?;
    log::info!(
        "Generated coefficient tables up to degree {}: {} binomial rows, {} trinomial rows",
        max_degree,
        binomial.num_rows(),
        trinomial.num_rows()
    );
    Ok(CoefficientTables {
        binomial,
        trinomial,
    })
}

/// `(N+1) x (N+1)` table with `C(n, i)` at `[n][i]` for `i <= n`, and zero elsewhere.
pub fn binomial_table(max_degree: u8) -> Result<BinomialTable, CoefficientError> {
    check_degree(max_degree)?;

    let mut table = CoefficientTable::zeros(max_degree);
    for n in 0..=max_degree {
        for i in 0..=n {
            table.set([n as usize, i as usize], binomial_coefficient(n, i)?);
        }
    }
    log::debug!("Binomial table of degree {max_degree} complete");
    Ok(table)
}

/// `(N+1)` blocks of `(N+1) x (N+1)` cells, with the trinomial coefficient of `(i, j, n - i - j)`
/// at `[n][i][j]` when `i + j <= n`.
///
/// Every other cell is padding: whole rows with `i > n`, and the columns `j > n - i` of the
/// remaining rows.
pub fn trinomial_table(max_degree: u8) -> Result<TrinomialTable, CoefficientError> {
    check_degree(max_degree)?;

    let mut table = CoefficientTable::zeros(max_degree);
    for n in 0..=max_degree {
        for i in 0..=n {
            for j in 0..=(n - i) {
                let coord = [n as usize, i as usize, j as usize];
                table.set(coord, trinomial_coefficient(n, i, j)?);
            }
        }
    }
    log::debug!("Trinomial table of degree {max_degree} complete");
    Ok(table)
}

// Fail before allocating (N+1)^3 cells that could never be filled exactly.
fn check_degree(max_degree: u8) -> Result<(), CoefficientError> {
    ensure!(
        max_degree <= MAX_EXACT_DEGREE,
        ArithmeticOverflowSnafu { degree: max_degree }
    );
    Ok(())
}
