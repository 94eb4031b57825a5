/// A dense coefficient table with `NDIM` dimensions, each of extent `max_degree + 1`.
///
/// The first index is always the degree. Cells are stored row-major in a flat array so the
/// last dimension forms contiguous rows of uniform width, which is the fixed-stride layout
/// curve and surface evaluators index into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoefficientTable<const NDIM: usize> {
    cells: Vec<u64>,

    max_degree: u8,

    // The stride lengths for each dimension in the flattened cells array.
    strides: [usize; NDIM],
}

/// `[degree][i]` = `C(degree, i)`.
pub type BinomialTable = CoefficientTable<2>;

/// `[degree][i][j]` = trinomial coefficient of `(i, j, degree - i - j)`.
pub type TrinomialTable = CoefficientTable<3>;

impl<const NDIM: usize> CoefficientTable<NDIM> {
    /// All-padding table. Generators fill the valid cells before handing it out.
    pub(crate) fn zeros(max_degree: u8) -> Self {
        let width = max_degree as usize + 1;
        let strides = Self::calc_strides(width);
        Self {
            cells: vec![0; width.pow(NDIM as u32)],
            max_degree,
            strides,
        }
    }

    pub(crate) fn set(&mut self, coord: [usize; NDIM], value: u64) {
        let flat_index = self.flat_index(coord);
        self.cells[flat_index] = value;
    }

    pub fn max_degree(&self) -> u8 {
        self.max_degree
    }

    /// Number of entries in every row (`max_degree + 1`).
    pub fn width(&self) -> usize {
        self.max_degree as usize + 1
    }

    pub fn shape(&self) -> [usize; NDIM] {
        [self.width(); NDIM]
    }

    pub fn strides(&self) -> [usize; NDIM] {
        self.strides
    }

    /// The flat, fixed-stride cell array.
    pub fn as_slice(&self) -> &[u64] {
        &self.cells
    }

    pub fn num_rows(&self) -> usize {
        self.cells.len() / self.width()
    }

    /// Rows of the last dimension, in storage order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u64]> {
        self.cells.chunks_exact(self.width())
    }

    /// The row addressed by every index except the last.
    ///
    /// For a trinomial table `row([n, i])` is the run of `j` values for degree `n` and first
    /// index `i`.
    pub fn row(&self, prefix: &[usize]) -> Option<&[u64]> {
        if prefix.len() + 1 != NDIM || prefix.iter().any(|&p| p >= self.width()) {
            return None;
        }
        let start: usize = prefix.iter().zip(&self.strides).map(|(p, s)| p * s).sum();
        Some(&self.cells[start..start + self.width()])
    }

    /// The sub-table for a single degree, flattened.
    pub fn degree_block(&self, degree: u8) -> Option<&[u64]> {
        if degree > self.max_degree {
            return None;
        }
        let start = degree as usize * self.strides[0];
        Some(&self.cells[start..start + self.strides[0]])
    }

    pub fn get(&self, coord: [usize; NDIM]) -> Option<u64> {
        if coord.iter().any(|&c| c >= self.width()) {
            return None;
        }
        Some(self.cells[self.flat_index(coord)])
    }

    fn flat_index(&self, coord: [usize; NDIM]) -> usize {
        let mut index = 0;
        for i in 0..NDIM {
            index += coord[i] * self.strides[i];
        }
        index
    }

    fn calc_strides(width: usize) -> [usize; NDIM] {
        let mut strides = [1usize; NDIM];
        for i in (0..NDIM.saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * width;
        }
        strides
    }
}

impl<const NDIM: usize> std::ops::Index<[usize; NDIM]> for CoefficientTable<NDIM> {
    type Output = u64;

    fn index(&self, coord: [usize; NDIM]) -> &Self::Output {
        assert!(
            coord.iter().all(|&c| c < self.width()),
            "Index {coord:?} out of bounds for table of width {}",
            self.width()
        );
        &self.cells[self.flat_index(coord)]
    }
}
