//! JSON request/response adapter for the three analysis operations.
//!
//! The body shape is `{"matrix": [[...], ...]}` for every operation.
//! Failures serialize as `{"error": "..."}`; a defective matrix on the
//! transform operation is data, not a failure, and serializes as
//! `{"result": "Not Diagonalizable", ...}`.
//!
//! Scalars serialize as plain JSON numbers when the imaginary part is
//! negligible (at most `CLUSTER_TOLERANCE` in modulus) and as two-element
//! `[re, im]` arrays otherwise; complex spectra are never silently dropped.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::analysis::jordan::jordan_form;
use crate::analysis::{analyze, diagonalize, Analysis, CLUSTER_TOLERANCE};
use crate::complex::Complex;
use crate::matrix::Matrix;
use crate::AnalysisError;

#[derive(Deserialize)]
struct MatrixRequest {
  matrix: Vec<Vec<f64>>,
}

/// The "analyze diagonalizability" operation.
pub fn check(body: &str) -> Value {
  let spectrum = parse_matrix(body).and_then(|a| analyze(&a));
  match spectrum {
    Ok(spectrum) => json!({
      "is_diagonalizable": spectrum.is_diagonalizable(),
      "eigenvalues": spectrum
        .eigenvalues
        .iter()
        .map(|ev| scalar_value(ev.value))
        .collect::<Vec<Value>>(),
      "total_independent_vectors": spectrum.independent_vectors,
    }),
    Err(e) => error_value(&e),
  }
}

/// The "compute transform" operation.
pub fn transform(body: &str) -> Value {
  let analysis = parse_matrix(body).and_then(|a| diagonalize(&a));
  match analysis {
    Ok(Analysis::Diagonalizable { transform, .. }) => json!({
      "result": "Diagonalizable",
      "P": matrix_value(&transform.p),
      "D": matrix_value(&transform.d),
      "P_inv": matrix_value(&transform.p_inv),
      "reconstruction_error": transform.reconstruction_error,
    }),
    Ok(Analysis::NotDiagonalizable { spectrum }) => json!({
      "result": "Not Diagonalizable",
      "error": format!(
        "matrix has {} independent eigenvectors, needs {}",
        spectrum.independent_vectors, spectrum.dim
      ),
    }),
    Err(e) => error_value(&e),
  }
}

/// The "compute Jordan form" operation.
pub fn jordan(body: &str) -> Value {
  let decomposition = parse_matrix(body).and_then(|a| jordan_form(&a));
  match decomposition {
    Ok(d) => json!({
      "jordan": matrix_value(&d.j),
      "P": matrix_value(&d.p),
      "P_inv": matrix_value(&d.p_inv),
      "A_reconstructed": matrix_value(&d.reconstructed),
      "reconstruction_error": d.reconstruction_error,
    }),
    Err(e) => error_value(&e),
  }
}

/// True when a response is a genuine failure payload (as opposed to the
/// expected "Not Diagonalizable" outcome, which also carries an error
/// message but is data).
pub fn is_failure(response: &Value) -> bool {
  response.get("error").is_some() && response.get("result").is_none()
}

fn parse_matrix(body: &str) -> Result<Matrix, AnalysisError> {
  let request: MatrixRequest = serde_json::from_str(body).map_err(|e| {
    AnalysisError::MalformedInput(format!("invalid request body: {e}"))
  })?;
  Matrix::from_real_rows(&request.matrix)
}

fn error_value(e: &AnalysisError) -> Value {
  json!({ "error": e.to_string() })
}

fn scalar_value(z: Complex) -> Value {
  if z.im.abs() <= CLUSTER_TOLERANCE {
    json!(z.re)
  } else {
    json!([z.re, z.im])
  }
}

fn matrix_value(m: &Matrix) -> Value {
  Value::Array(
    m.rows()
      .iter()
      .map(|row| {
        Value::Array(row.iter().map(|&z| scalar_value(z)).collect())
      })
      .collect(),
  )
}
