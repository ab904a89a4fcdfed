//! Diagonalizability analysis for dense numeric matrices.
//!
//! Given a square matrix, [`analyze`] decides whether it is diagonalizable
//! by clustering the computed eigenvalues, taking the nullity of each
//! shifted matrix A - lambda*I as the geometric multiplicity, and comparing
//! the sum against the dimension. [`diagonalize`] additionally produces the
//! witnessing similarity transform (P, D, P^-1), and [`jordan_form`] the
//! generalized decomposition (P, J, P^-1) that exists for every square
//! matrix, defective or not. Each result carries its own reconstruction
//! P*(D|J)*P^-1 so callers can confirm fidelity.
//!
//! Every analysis is a pure, synchronous computation over an immutable
//! input; independent calls share no state and may run fully in parallel.

use thiserror::Error;

pub mod analysis;
pub mod complex;
pub mod linalg;
pub mod matrix;
pub mod transport;

#[derive(Error, Debug)]
pub enum AnalysisError {
  /// Shape or type violation, caught before any numeric routine runs.
  #[error("Malformed input: {0}")]
  MalformedInput(String),
  /// The eigenvalue iteration failed to converge, or the solver and the
  /// rank tolerance produced inconsistent multiplicities.
  #[error("Solver divergence: {0}")]
  SolverDivergence(String),
  /// The assembled eigenvector matrix is not invertible despite a
  /// positive diagonalizability decision.
  #[error("Singular transform: {0}")]
  SingularTransform(String),
  /// The generalized chain construction did not produce a full basis.
  #[error("Jordan form unavailable: {0}")]
  JordanFormUnavailable(String),
}

pub use analysis::jordan::{jordan_form, JordanDecomposition};
pub use analysis::{
  analyze, cluster_eigenvalues, diagonalize, geometric_multiplicity,
  Analysis, Eigenvalue, Spectrum, Transform, CLUSTER_TOLERANCE,
  NULLITY_TOLERANCE, RANK_TOLERANCE, RECONSTRUCTION_TOLERANCE,
};
pub use complex::Complex;
pub use matrix::Matrix;
