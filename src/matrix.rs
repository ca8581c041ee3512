//! Dense, triangular and bit matrices used by the encodings and operators.

use fixedbitset::FixedBitSet;
use std::fmt;

/// Row-major matrix of `f64` with contiguous storage.
///
/// Centroid sets, per-cluster sums and codebooks are all `k × d` row
/// matrices; rows are handed out as slices so the [kernel](crate::kernel)
/// operations apply directly.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMatrix {
    num_rows: usize,
    num_cols: usize,
    data: Vec<f64>,
}

impl RowMatrix {
    pub fn zeroed(num_rows: usize, num_cols: usize) -> Self {
        Self {
            num_rows,
            num_cols,
            data: vec![0.0; num_rows * num_cols],
        }
    }

    /// Builds from a flat row-major buffer. `data.len()` must be a multiple
    /// of `num_cols`.
    pub fn from_vec(num_cols: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len() % num_cols, 0);
        Self {
            num_rows: data.len() / num_cols,
            num_cols,
            data,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.num_cols..(i + 1) * self.num_cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.num_cols..(i + 1) * self.num_cols]
    }

    pub fn copy_row_from(&mut self, i: usize, src: &[f64]) {
        self.row_mut(i).copy_from_slice(src);
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let (lo, hi) = (i.min(j), i.max(j));
        let (head, tail) = self.data.split_at_mut(hi * self.num_cols);
        head[lo * self.num_cols..(lo + 1) * self.num_cols]
            .swap_with_slice(&mut tail[..self.num_cols]);
    }

    pub fn push_row(&mut self, row: &[f64]) {
        assert_eq!(row.len(), self.num_cols);
        self.data.extend_from_slice(row);
        self.num_rows += 1;
    }

    pub fn fill(&mut self, value: f64) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.num_cols)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Keeps the listed rows, in the given order, dropping the rest.
    pub fn keep_rows(&mut self, keep: &[usize]) {
        let mut data = Vec::with_capacity(keep.len() * self.num_cols);
        for &i in keep {
            data.extend_from_slice(self.row(i));
        }
        self.data = data;
        self.num_rows = keep.len();
    }
}

impl fmt::Display for RowMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row:?}")?;
        }
        Ok(())
    }
}

/// A row matrix where individual rows may be dead.
///
/// A dead row stands for an eliminated cluster: its storage remains but it is
/// skipped by nearest-centroid scans and recomputation. This replaces the
/// infinity-sentinel rows of the usual formulation with an explicit live-row
/// bitmap, so no ∞/NaN arithmetic can leak into distances.
#[derive(Debug, Clone, PartialEq)]
pub struct NullableRowMatrix {
    matrix: RowMatrix,
    live: FixedBitSet,
}

impl NullableRowMatrix {
    /// All rows start live and zeroed.
    pub fn zeroed(num_rows: usize, num_cols: usize) -> Self {
        let mut live = FixedBitSet::with_capacity(num_rows);
        live.insert_range(..);
        Self {
            matrix: RowMatrix::zeroed(num_rows, num_cols),
            live,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.matrix.num_rows()
    }

    pub fn num_cols(&self) -> usize {
        self.matrix.num_cols()
    }

    pub fn is_live(&self, i: usize) -> bool {
        self.live.contains(i)
    }

    pub fn num_live(&self) -> usize {
        self.live.count_ones(..)
    }

    pub fn kill_row(&mut self, i: usize) {
        self.live.set(i, false);
    }

    pub fn revive_row(&mut self, i: usize, row: &[f64]) {
        self.matrix.copy_row_from(i, row);
        self.live.set(i, true);
    }

    pub fn row(&self, i: usize) -> &[f64] {
        self.matrix.row(i)
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        self.matrix.row_mut(i)
    }

    pub fn copy_row_from(&mut self, i: usize, src: &[f64]) {
        self.matrix.copy_row_from(i, src);
    }

    pub fn push_live_row(&mut self, row: &[f64]) {
        self.matrix.push_row(row);
        self.live.grow(self.matrix.num_rows());
        self.live.insert(self.matrix.num_rows() - 1);
    }

    /// Live `(index, row)` pairs in row order.
    pub fn live_rows(&self) -> impl Iterator<Item = (usize, &[f64])> {
        self.live.ones().map(|i| (i, self.matrix.row(i)))
    }

    /// Keeps the listed rows (all must be live), renumbering them `0..`.
    pub fn keep_rows(&mut self, keep: &[usize]) {
        self.matrix.keep_rows(keep);
        self.live = FixedBitSet::with_capacity(keep.len());
        self.live.insert_range(..);
    }

    pub fn as_row_matrix(&self) -> &RowMatrix {
        &self.matrix
    }
}

/// Symmetric `n × n` dissimilarity matrix stored lower-triangular with an
/// implicit zero diagonal. Read-only after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangularMatrix {
    n: usize,
    data: Vec<f64>,
}

impl TriangularMatrix {
    pub fn zeroed(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n.saturating_sub(1) / 2],
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    fn offset(i: usize, j: usize) -> usize {
        debug_assert!(j < i);
        i * (i - 1) / 2 + j
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            0.0
        } else if j < i {
            self.data[Self::offset(i, j)]
        } else {
            self.data[Self::offset(j, i)]
        }
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        assert_ne!(i, j, "the diagonal is fixed at zero");
        let idx = if j < i {
            Self::offset(i, j)
        } else {
            Self::offset(j, i)
        };
        self.data[idx] = value;
    }
}

/// A `rows × cols` bit matrix; one `FixedBitSet` per row.
///
/// The crisp partition encoding stores cluster membership here: bit `(k, i)`
/// set means instance `i` belongs to cluster `k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    rows: Vec<FixedBitSet>,
    num_cols: usize,
}

impl BitMatrix {
    pub fn zeroed(num_rows: usize, num_cols: usize) -> Self {
        Self {
            rows: vec![FixedBitSet::with_capacity(num_cols); num_rows],
            num_cols,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn get(&self, r: usize, c: usize) -> bool {
        self.rows[r].contains(c)
    }

    pub fn set(&mut self, r: usize, c: usize, value: bool) {
        self.rows[r].set(c, value);
    }

    pub fn row(&self, r: usize) -> &FixedBitSet {
        &self.rows[r]
    }

    pub fn row_count_ones(&self, r: usize) -> usize {
        self.rows[r].count_ones(..)
    }

    /// The row whose bit is set in column `c`, scanning top to bottom.
    pub fn column_one(&self, c: usize) -> Option<usize> {
        self.rows.iter().position(|row| row.contains(c))
    }

    /// Clears column `c` in every row, then sets bit `(r, c)`.
    pub fn assign_column(&mut self, c: usize, r: usize) {
        for row in &mut self.rows {
            row.set(c, false);
        }
        self.rows[r].insert(c);
    }

    /// Swaps the column range `[from, to)` between `self` and `other`.
    pub fn swap_column_range(&mut self, other: &mut BitMatrix, from: usize, to: usize) {
        debug_assert_eq!(self.num_cols, other.num_cols);
        debug_assert_eq!(self.rows.len(), other.rows.len());
        for (row_a, row_b) in self.rows.iter_mut().zip(&mut other.rows) {
            for c in from..to {
                let a = row_a.contains(c);
                let b = row_b.contains(c);
                row_a.set(c, b);
                row_b.set(c, a);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_matrix_swap_rows() {
        let mut m = RowMatrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        m.swap_rows(0, 2);
        assert_eq!(m.row(0), &[5.0, 6.0]);
        assert_eq!(m.row(2), &[1.0, 2.0]);
    }

    #[test]
    fn nullable_rows_compact() {
        let mut m = NullableRowMatrix::zeroed(3, 2);
        m.copy_row_from(0, &[1.0, 1.0]);
        m.copy_row_from(2, &[3.0, 3.0]);
        m.kill_row(1);
        assert_eq!(m.num_live(), 2);
        m.keep_rows(&[0, 2]);
        assert_eq!(m.num_rows(), 2);
        assert_eq!(m.row(1), &[3.0, 3.0]);
        assert!(m.is_live(1));
    }

    #[test]
    fn triangular_is_symmetric() {
        let mut t = TriangularMatrix::zeroed(4);
        t.set(2, 1, 7.5);
        assert_eq!(t.get(1, 2), 7.5);
        assert_eq!(t.get(2, 2), 0.0);
    }

    #[test]
    fn bit_matrix_column_assignment() {
        let mut b = BitMatrix::zeroed(3, 4);
        b.assign_column(1, 2);
        b.assign_column(1, 0);
        assert_eq!(b.column_one(1), Some(0));
        assert_eq!(b.row_count_ones(2), 0);
    }

    #[test]
    fn bit_matrix_swap_columns() {
        let mut a = BitMatrix::zeroed(2, 4);
        let mut b = BitMatrix::zeroed(2, 4);
        a.assign_column(0, 0);
        a.assign_column(3, 0);
        b.assign_column(0, 1);
        a.swap_column_range(&mut b, 0, 2);
        assert_eq!(a.column_one(0), Some(1));
        assert_eq!(b.column_one(0), Some(0));
        assert_eq!(a.column_one(3), Some(0));
    }
}
