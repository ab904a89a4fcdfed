//! Validated dense square matrix.
//!
//! A `Matrix` can only be built through validating constructors, so holding
//! one is the type-level proof that the shape gate already ran: square,
//! at least 1×1, no ragged rows, every entry finite. Raw request data never
//! reaches a numeric routine without passing through here first.

use crate::complex::Complex;
use crate::AnalysisError;

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
  n: usize,
  data: Vec<Complex>, // row-major, n * n
}

impl Matrix {
  /// Build from rows of complex entries. Fails with `MalformedInput` on
  /// empty, ragged or non-square input.
  pub fn from_rows(rows: &[Vec<Complex>]) -> Result<Self, AnalysisError> {
    if rows.is_empty() {
      return Err(AnalysisError::MalformedInput(
        "matrix must have at least one row".into(),
      ));
    }
    let n = rows.len();
    let mut data = Vec::with_capacity(n * n);
    for (i, row) in rows.iter().enumerate() {
      if row.len() != n {
        return Err(AnalysisError::MalformedInput(format!(
          "matrix must be square: row {} has {} entries, expected {}",
          i + 1,
          row.len(),
          n
        )));
      }
      for &entry in row {
        if !entry.is_finite() {
          return Err(AnalysisError::MalformedInput(format!(
            "matrix entry at row {} is not a finite number",
            i + 1
          )));
        }
        data.push(entry);
      }
    }
    Ok(Matrix { n, data })
  }

  /// Build from rows of real entries (the JSON request shape).
  pub fn from_real_rows(rows: &[Vec<f64>]) -> Result<Self, AnalysisError> {
    let complex_rows: Vec<Vec<Complex>> = rows
      .iter()
      .map(|row| row.iter().map(|&x| Complex::real(x)).collect())
      .collect();
    Matrix::from_rows(&complex_rows)
  }

  pub fn identity(n: usize) -> Self {
    let mut m = Matrix::zeros(n);
    for i in 0..n {
      m.set(i, i, Complex::ONE);
    }
    m
  }

  pub fn zeros(n: usize) -> Self {
    Matrix {
      n,
      data: vec![Complex::ZERO; n * n],
    }
  }

  /// Diagonal matrix from its diagonal entries.
  pub fn diagonal(values: &[Complex]) -> Self {
    let mut m = Matrix::zeros(values.len());
    for (i, &v) in values.iter().enumerate() {
      m.set(i, i, v);
    }
    m
  }

  /// Assemble from column vectors. Internal: callers guarantee `columns`
  /// holds exactly `n` vectors of length `n`.
  pub(crate) fn from_columns(n: usize, columns: &[Vec<Complex>]) -> Self {
    debug_assert_eq!(columns.len(), n);
    let mut m = Matrix::zeros(n);
    for (j, col) in columns.iter().enumerate() {
      debug_assert_eq!(col.len(), n);
      for (i, &v) in col.iter().enumerate() {
        m.set(i, j, v);
      }
    }
    m
  }

  pub fn dim(&self) -> usize {
    self.n
  }

  pub fn get(&self, i: usize, j: usize) -> Complex {
    self.data[i * self.n + j]
  }

  pub fn set(&mut self, i: usize, j: usize, v: Complex) {
    self.data[i * self.n + j] = v;
  }

  /// A − λI as a fresh value; the receiver is never mutated.
  pub fn shifted(&self, lambda: Complex) -> Matrix {
    let mut m = self.clone();
    for i in 0..self.n {
      m.set(i, i, m.get(i, i) - lambda);
    }
    m
  }

  pub fn matmul(&self, other: &Matrix) -> Matrix {
    debug_assert_eq!(self.n, other.n);
    let n = self.n;
    let mut out = Matrix::zeros(n);
    for i in 0..n {
      for j in 0..n {
        let mut sum = Complex::ZERO;
        for k in 0..n {
          sum = sum + self.get(i, k) * other.get(k, j);
        }
        out.set(i, j, sum);
      }
    }
    out
  }

  /// Apply the matrix to a vector.
  pub fn apply(&self, v: &[Complex]) -> Vec<Complex> {
    debug_assert_eq!(v.len(), self.n);
    (0..self.n)
      .map(|i| {
        let mut sum = Complex::ZERO;
        for (j, &x) in v.iter().enumerate() {
          sum = sum + self.get(i, j) * x;
        }
        sum
      })
      .collect()
  }

  /// Largest entry modulus; 0 for the zero matrix.
  pub fn max_abs(&self) -> f64 {
    self.data.iter().map(|z| z.abs()).fold(0.0, f64::max)
  }

  /// Largest entrywise deviation from `other`.
  pub fn max_abs_diff(&self, other: &Matrix) -> f64 {
    debug_assert_eq!(self.n, other.n);
    self
      .data
      .iter()
      .zip(other.data.iter())
      .map(|(&a, &b)| (a - b).abs())
      .fold(0.0, f64::max)
  }

  pub fn rows(&self) -> Vec<Vec<Complex>> {
    (0..self.n)
      .map(|i| (0..self.n).map(|j| self.get(i, j)).collect())
      .collect()
  }
}
