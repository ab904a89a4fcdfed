//! Diagonalizability analysis pipeline.
//!
//! Raw eigenvalues from the solver are clustered under `CLUSTER_TOLERANCE`,
//! each distinct eigenvalue gets a geometric multiplicity from the nullity
//! of the shifted matrix, and the matrix is diagonalizable exactly when the
//! geometric multiplicities sum to the dimension. On the diagonalizable
//! path the transform (P, D, P^-1) is assembled from null-space bases and
//! verified by reconstruction; the defective path lives in [`jordan`].

pub mod jordan;

use crate::complex::Complex;
use crate::linalg;
use crate::matrix::Matrix;
use crate::AnalysisError;

/// Bucket width for grouping raw eigenvalues into distinct clusters, on
/// both the real and imaginary part. Two true eigenvalues closer than this
/// merge into one cluster; that is a deliberate precision/sensitivity
/// trade-off, tune it here.
pub const CLUSTER_TOLERANCE: f64 = 1e-6;

/// Relative pivot threshold for rank, null-space and inverse computations.
pub const RANK_TOLERANCE: f64 = 1e-8;

/// Relative pivot threshold for nullity computations on shifted matrices
/// A - lambda*I. The cluster representative sits up to `CLUSTER_TOLERANCE`
/// away from the raw eigenvalue, so the shifted matrix carries a residual
/// pivot of that order on true null directions; the rank test has to treat
/// it as zero, which the tighter `RANK_TOLERANCE` would not.
pub const NULLITY_TOLERANCE: f64 = CLUSTER_TOLERANCE;

/// Reconstruction deviation up to which P*(D|J)*P^-1 counts as matching
/// the input. An order of magnitude above the clustering grid, which
/// bounds the eigenvalue error the transform deliberately carries.
/// Advisory only; a larger deviation is reported, never fatal.
pub const RECONSTRUCTION_TOLERANCE: f64 = 1e-5;

/// One distinct eigenvalue with both of its multiplicities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eigenvalue {
  pub value: Complex,
  pub algebraic: usize,
  pub geometric: usize,
}

/// The clustered spectrum of a matrix, in solver insertion order.
/// No canonical ordering of `eigenvalues` is promised.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
  pub dim: usize,
  pub eigenvalues: Vec<Eigenvalue>,
  /// Sum of geometric multiplicities over all distinct eigenvalues.
  pub independent_vectors: usize,
}

impl Spectrum {
  pub fn is_diagonalizable(&self) -> bool {
    self.independent_vectors == self.dim
  }
}

/// A verified similarity transform A = P * D * P^-1.
#[derive(Debug, Clone)]
pub struct Transform {
  pub p: Matrix,
  pub d: Matrix,
  pub p_inv: Matrix,
  /// P * D * P^-1, recomputed so callers can confirm fidelity.
  pub reconstructed: Matrix,
  /// Largest entrywise deviation of `reconstructed` from the input.
  pub reconstruction_error: f64,
}

impl Transform {
  pub fn reconstruction_ok(&self) -> bool {
    self.reconstruction_error <= RECONSTRUCTION_TOLERANCE
  }
}

/// Outcome of a diagonalization run. A defective matrix is a valid result,
/// not an error; genuine failures are the `Err` side of the operations.
#[derive(Debug, Clone)]
pub enum Analysis {
  Diagonalizable {
    spectrum: Spectrum,
    transform: Transform,
  },
  NotDiagonalizable {
    spectrum: Spectrum,
  },
}

/// Group raw eigenvalues into distinct clusters by rounding both parts to
/// the tolerance grid. The representative is the rounded value, not the raw
/// one, so downstream shift matrices agree with the clustering decision;
/// the cluster size is the algebraic multiplicity.
pub fn cluster_eigenvalues(
  raw: &[Complex],
  tol: f64,
) -> Vec<(Complex, usize)> {
  let mut clusters: Vec<(Complex, usize)> = Vec::new();
  for z in raw {
    let rep = Complex::new(grid_round(z.re, tol), grid_round(z.im, tol));
    match clusters.iter_mut().find(|(c, _)| *c == rep) {
      Some(cluster) => cluster.1 += 1,
      None => clusters.push((rep, 1)),
    }
  }
  clusters
}

// Rounding is deterministic, so equal buckets produce bitwise-equal
// representatives and cluster membership is plain equality.
fn grid_round(x: f64, tol: f64) -> f64 {
  let scaled = x / tol;
  // beyond 2^53 grid steps the grid is finer than the float spacing:
  // rounding cannot merge distinct values, and the scale round-trip would
  // only smear the representative away from the exact eigenvalue
  if scaled.abs() >= 9_007_199_254_740_992.0 {
    return x;
  }
  scaled.round() * tol
}

/// Nullity of A - lambda*I, computed fresh for this eigenvalue. The rank
/// test runs under `NULLITY_TOLERANCE` because `lambda` is a rounded
/// cluster representative, not the raw solver output.
pub fn geometric_multiplicity(a: &Matrix, lambda: Complex) -> usize {
  a.dim() - linalg::rank(&a.shifted(lambda), NULLITY_TOLERANCE)
}

/// Full spectrum analysis: solve, cluster, and attach multiplicities.
/// This is the "analyze diagonalizability" operation.
pub fn analyze(a: &Matrix) -> Result<Spectrum, AnalysisError> {
  let raw = linalg::eigen::eigenvalues(a)?;
  let clusters = cluster_eigenvalues(&raw, CLUSTER_TOLERANCE);
  let mut eigenvalues = Vec::with_capacity(clusters.len());
  let mut independent_vectors = 0;
  for (value, algebraic) in clusters {
    let geometric = geometric_multiplicity(a, value);
    // geometric multiplicity is between 1 and the algebraic multiplicity
    // for every true eigenvalue; anything else means the solver and the
    // rank tolerance disagree and must not be trusted silently
    if geometric == 0 {
      return Err(AnalysisError::SolverDivergence(format!(
        "eigenvalue {value}: no null-space direction found for A - lambda*I"
      )));
    }
    if geometric > algebraic {
      return Err(AnalysisError::SolverDivergence(format!(
        "eigenvalue {value}: geometric multiplicity {geometric} exceeds \
         algebraic multiplicity {algebraic}"
      )));
    }
    independent_vectors += geometric;
    eigenvalues.push(Eigenvalue {
      value,
      algebraic,
      geometric,
    });
  }
  Ok(Spectrum {
    dim: a.dim(),
    eigenvalues,
    independent_vectors,
  })
}

/// The "compute transform" operation: decide diagonalizability and, on the
/// positive branch, build and verify (P, D, P^-1).
pub fn diagonalize(a: &Matrix) -> Result<Analysis, AnalysisError> {
  let spectrum = analyze(a)?;
  if !spectrum.is_diagonalizable() {
    return Ok(Analysis::NotDiagonalizable { spectrum });
  }
  let transform = build_transform(a, &spectrum)?;
  Ok(Analysis::Diagonalizable {
    spectrum,
    transform,
  })
}

/// Assemble P from per-eigenvalue null-space bases (columns grouped in
/// cluster order), D from the matching eigenvalues, and P^-1 by inversion.
fn build_transform(
  a: &Matrix,
  spectrum: &Spectrum,
) -> Result<Transform, AnalysisError> {
  let n = a.dim();
  let mut columns: Vec<Vec<Complex>> = Vec::with_capacity(n);
  let mut diag: Vec<Complex> = Vec::with_capacity(n);
  for ev in &spectrum.eigenvalues {
    let basis = linalg::null_space(&a.shifted(ev.value), NULLITY_TOLERANCE);
    if basis.len() != ev.geometric {
      return Err(AnalysisError::SolverDivergence(format!(
        "eigenvalue {}: null-space basis has {} vectors, expected {}",
        ev.value,
        basis.len(),
        ev.geometric
      )));
    }
    for v in basis {
      columns.push(v);
      diag.push(ev.value);
    }
  }
  let p = Matrix::from_columns(n, &columns);
  let d = Matrix::diagonal(&diag);
  // a singular P despite a positive decision means the float null-space
  // bases came out near-dependent; surface it instead of crashing
  let p_inv = linalg::inverse(&p, RANK_TOLERANCE)?;
  let reconstructed = p.matmul(&d).matmul(&p_inv);
  let reconstruction_error = reconstructed.max_abs_diff(a);
  Ok(Transform {
    p,
    d,
    p_inv,
    reconstructed,
    reconstruction_error,
  })
}
