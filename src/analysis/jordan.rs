//! Generalized Jordan decomposition.
//!
//! Every square matrix over the complex numbers admits A = P * J * P^-1
//! with J block diagonal, so this operation succeeds on defective input
//! where plain diagonalization cannot. For each distinct eigenvalue the
//! null spaces of (A - lambda*I)^k form a ladder; chain heads are picked
//! from the top rung, independent modulo the rung below, and each head is
//! pushed down the ladder with repeated applications of the shifted matrix.
//! Chains are emitted eigenvector-first, which puts the 1s of each Jordan
//! block on the superdiagonal.

use crate::complex::Complex;
use crate::linalg::{self, ColumnSpace};
use crate::matrix::Matrix;
use crate::AnalysisError;

use super::{analyze, Eigenvalue, NULLITY_TOLERANCE, RANK_TOLERANCE};

/// A verified decomposition A = P * J * P^-1 with J in Jordan form.
#[derive(Debug, Clone)]
pub struct JordanDecomposition {
  pub p: Matrix,
  pub j: Matrix,
  pub p_inv: Matrix,
  /// P * J * P^-1, recomputed so callers can confirm fidelity.
  pub reconstructed: Matrix,
  /// Largest entrywise deviation of `reconstructed` from the input.
  pub reconstruction_error: f64,
}

impl JordanDecomposition {
  pub fn reconstruction_ok(&self) -> bool {
    self.reconstruction_error <= super::RECONSTRUCTION_TOLERANCE
  }
}

/// The "compute Jordan form" operation.
pub fn jordan_form(a: &Matrix) -> Result<JordanDecomposition, AnalysisError> {
  let n = a.dim();
  let spectrum = analyze(a)?;

  let mut columns: Vec<Vec<Complex>> = Vec::with_capacity(n);
  // (eigenvalue, block size) in column order
  let mut blocks: Vec<(Complex, usize)> = Vec::new();
  for ev in &spectrum.eigenvalues {
    for chain in eigen_chains(a, ev)? {
      blocks.push((ev.value, chain.len()));
      columns.extend(chain);
    }
  }
  if columns.len() != n {
    return Err(AnalysisError::JordanFormUnavailable(format!(
      "chain basis spans {} of {} dimensions",
      columns.len(),
      n
    )));
  }

  let p = Matrix::from_columns(n, &columns);
  let j = jordan_matrix(n, &blocks);
  let p_inv = linalg::inverse(&p, RANK_TOLERANCE).map_err(|_| {
    AnalysisError::JordanFormUnavailable(
      "chain basis matrix is numerically singular".into(),
    )
  })?;
  let reconstructed = p.matmul(&j).matmul(&p_inv);
  let reconstruction_error = reconstructed.max_abs_diff(a);
  Ok(JordanDecomposition {
    p,
    j,
    p_inv,
    reconstructed,
    reconstruction_error,
  })
}

/// All Jordan chains for one distinct eigenvalue. Each chain is a list of
/// basis vectors, eigenvector first, generalized vectors after.
fn eigen_chains(
  a: &Matrix,
  ev: &Eigenvalue,
) -> Result<Vec<Vec<Vec<Complex>>>, AnalysisError> {
  let n = a.dim();
  let shifted = a.shifted(ev.value);

  // nullity ladder: rungs[k] spans the null space of shifted^(k+1);
  // the chain length never exceeds the algebraic multiplicity, which
  // bounds the loop
  let mut rungs: Vec<Vec<Vec<Complex>>> =
    vec![linalg::null_space(&shifted, NULLITY_TOLERANCE)];
  let mut power = shifted.clone();
  while rungs[rungs.len() - 1].len() < ev.algebraic
    && rungs.len() < ev.algebraic
  {
    power = power.matmul(&shifted);
    let rung = linalg::null_space(&power, NULLITY_TOLERANCE);
    if rung.len() <= rungs[rungs.len() - 1].len() {
      break; // ladder stalled
    }
    rungs.push(rung);
  }
  let top = rungs.len() - 1;
  if rungs[top].len() != ev.algebraic {
    return Err(AnalysisError::JordanFormUnavailable(format!(
      "eigenvalue {}: generalized null spaces reach {} of {} directions",
      ev.value,
      rungs[top].len(),
      ev.algebraic
    )));
  }

  let mut chains: Vec<Vec<Vec<Complex>>> = Vec::new();
  // work down the ladder, longest chains first
  for k in (0..=top).rev() {
    let target = rungs[k].len();
    // rung vectors carry the same representative-rounding residual as the
    // null spaces they came from, so independence runs at the same tolerance
    let mut span = ColumnSpace::new(n, NULLITY_TOLERANCE);
    if k > 0 {
      for v in &rungs[k - 1] {
        span.insert(v);
      }
    }
    // vectors already sitting at this height, inherited from longer chains
    for chain in &chains {
      if chain.len() > k {
        span.insert(&chain[k]);
      }
    }
    let mut heads: Vec<Vec<Complex>> = Vec::new();
    for candidate in &rungs[k] {
      if span.dim() >= target {
        break;
      }
      if span.insert(candidate) {
        heads.push(candidate.clone());
      }
    }
    if span.dim() < target {
      return Err(AnalysisError::JordanFormUnavailable(format!(
        "eigenvalue {}: could not select independent chain heads at \
         height {}",
        ev.value,
        k + 1
      )));
    }
    for head in heads {
      let mut chain = vec![head];
      for _ in 0..k {
        let next = shifted.apply(&chain[chain.len() - 1]);
        chain.push(next);
      }
      chain.reverse();
      chains.push(chain);
    }
  }
  Ok(chains)
}

/// Block-diagonal Jordan matrix from (eigenvalue, block size) pairs.
fn jordan_matrix(n: usize, blocks: &[(Complex, usize)]) -> Matrix {
  let mut j = Matrix::zeros(n);
  let mut offset = 0;
  for &(lambda, size) in blocks {
    for t in 0..size {
      j.set(offset + t, offset + t, lambda);
      if t + 1 < size {
        j.set(offset + t, offset + t + 1, Complex::ONE);
      }
    }
    offset += size;
  }
  j
}
