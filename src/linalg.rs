//! Dense numeric primitives: row reduction, rank, null space, inverse.
//!
//! These are the routines the analysis core treats as its primitive
//! surface. All of them take an explicit tolerance; a pivot whose modulus
//! falls at or below `tol * scale` (scale = max entry modulus, at least 1)
//! is treated as zero.

pub mod eigen;

use crate::complex::Complex;
use crate::matrix::Matrix;
use crate::AnalysisError;

/// Reduced row echelon form with partial pivoting.
/// Returns the reduced matrix together with the pivot column indices.
pub fn row_reduce(m: &Matrix, tol: f64) -> (Matrix, Vec<usize>) {
  let n = m.dim();
  let mut r = m.clone();
  let scale = r.max_abs().max(1.0);
  let mut pivots = Vec::new();
  let mut row = 0;
  for col in 0..n {
    let mut best = row;
    for i in row + 1..n {
      if r.get(i, col).abs() > r.get(best, col).abs() {
        best = i;
      }
    }
    if r.get(best, col).abs() <= tol * scale {
      continue;
    }
    if best != row {
      for j in 0..n {
        let tmp = r.get(row, j);
        r.set(row, j, r.get(best, j));
        r.set(best, j, tmp);
      }
    }
    let pivot = r.get(row, col);
    for j in 0..n {
      r.set(row, j, r.get(row, j) / pivot);
    }
    for i in 0..n {
      if i == row {
        continue;
      }
      let factor = r.get(i, col);
      if factor.abs() == 0.0 {
        continue;
      }
      for j in 0..n {
        r.set(i, j, r.get(i, j) - factor * r.get(row, j));
      }
    }
    pivots.push(col);
    row += 1;
    if row == n {
      break;
    }
  }
  (r, pivots)
}

/// Rank under the given tolerance.
pub fn rank(m: &Matrix, tol: f64) -> usize {
  row_reduce(m, tol).1.len()
}

/// Basis of the null space, one vector per free column of the RREF.
/// Each basis vector carries a 1 in its free coordinate.
pub fn null_space(m: &Matrix, tol: f64) -> Vec<Vec<Complex>> {
  let n = m.dim();
  let (r, pivots) = row_reduce(m, tol);
  let mut basis = Vec::with_capacity(n - pivots.len());
  for free in 0..n {
    if pivots.contains(&free) {
      continue;
    }
    let mut v = vec![Complex::ZERO; n];
    v[free] = Complex::ONE;
    for (i, &pcol) in pivots.iter().enumerate() {
      v[pcol] = -r.get(i, free);
    }
    basis.push(v);
  }
  basis
}

/// Gauss-Jordan inverse via the augmented [M | I] tableau.
pub fn inverse(m: &Matrix, tol: f64) -> Result<Matrix, AnalysisError> {
  let n = m.dim();
  let scale = m.max_abs().max(1.0);
  let mut aug: Vec<Vec<Complex>> = (0..n)
    .map(|i| {
      let mut row: Vec<Complex> = (0..n).map(|j| m.get(i, j)).collect();
      row.extend((0..n).map(|j| {
        if i == j {
          Complex::ONE
        } else {
          Complex::ZERO
        }
      }));
      row
    })
    .collect();

  for col in 0..n {
    let mut best = col;
    for i in col + 1..n {
      if aug[i][col].abs() > aug[best][col].abs() {
        best = i;
      }
    }
    if aug[best][col].abs() <= tol * scale {
      return Err(AnalysisError::SingularTransform(
        "Inverse: matrix is numerically singular".into(),
      ));
    }
    aug.swap(col, best);
    let pivot = aug[col][col];
    for j in 0..2 * n {
      aug[col][j] = aug[col][j] / pivot;
    }
    for i in 0..n {
      if i == col {
        continue;
      }
      let factor = aug[i][col];
      if factor.abs() == 0.0 {
        continue;
      }
      for j in 0..2 * n {
        aug[i][j] = aug[i][j] - factor * aug[col][j];
      }
    }
  }

  let mut out = Matrix::zeros(n);
  for i in 0..n {
    for j in 0..n {
      out.set(i, j, aug[i][n + j]);
    }
  }
  Ok(out)
}

/// Incrementally maintained column span with tolerance-based independence
/// tests. Used by the Jordan chain builder to pick chain heads that are
/// independent modulo an already-spanned subspace.
pub struct ColumnSpace {
  rows: usize,
  tol: f64,
  // (pivot row, column reduced against earlier pivots, normalized to 1
  // at its pivot row)
  pivots: Vec<(usize, Vec<Complex>)>,
}

impl ColumnSpace {
  pub fn new(rows: usize, tol: f64) -> Self {
    ColumnSpace {
      rows,
      tol,
      pivots: Vec::new(),
    }
  }

  pub fn dim(&self) -> usize {
    self.pivots.len()
  }

  /// Insert a vector if it is independent of the current span.
  /// Returns false (and leaves the span unchanged) if it is dependent.
  pub fn insert(&mut self, v: &[Complex]) -> bool {
    debug_assert_eq!(v.len(), self.rows);
    let scale = v.iter().map(|z| z.abs()).fold(1.0, f64::max);
    let mut w = v.to_vec();
    for (row, basis) in &self.pivots {
      let factor = w[*row];
      if factor.abs() == 0.0 {
        continue;
      }
      for (wi, bi) in w.iter_mut().zip(basis.iter()) {
        *wi = *wi - factor * *bi;
      }
    }
    let mut pivot_row = 0;
    let mut pivot_abs = 0.0;
    for (i, z) in w.iter().enumerate() {
      if z.abs() > pivot_abs {
        pivot_abs = z.abs();
        pivot_row = i;
      }
    }
    if pivot_abs <= self.tol * scale {
      return false;
    }
    let pivot = w[pivot_row];
    for wi in w.iter_mut() {
      *wi = *wi / pivot;
    }
    self.pivots.push((pivot_row, w));
    true
  }
}
