//! Complex shifted-QR eigenvalue solver.
//!
//! The matrix is first reduced to upper Hessenberg form with Householder
//! reflectors, then driven to triangular form by QR sweeps built from
//! Givens rotations with a Wilkinson shift taken from the trailing 2x2
//! block. Subdiagonal entries that fall below the deflation threshold are
//! zeroed and the active block shrinks from the bottom. The eigenvalues are
//! the diagonal of the converged factor, read top to bottom; that order is
//! what the rest of the pipeline calls "solver order".
//!
//! This adapter performs no diagonalizability logic; it only solves for
//! eigenvalues. Eigenvectors are recomputed downstream from null spaces of
//! the shifted matrix, so they are not extracted here.

use crate::complex::Complex;
use crate::matrix::Matrix;
use crate::AnalysisError;

/// QR sweep budget per matrix dimension. The whole run may spend at most
/// `MAX_QR_SWEEPS * n` sweeps before reporting `SolverDivergence`.
pub const MAX_QR_SWEEPS: usize = 60;

/// Relative threshold under which a subdiagonal entry is declared zero.
const DEFLATION_THRESHOLD: f64 = 1e-12;

/// Every 16th sweep on a stubborn block uses an ad-hoc shift instead of the
/// Wilkinson shift, to break out of symmetric stalls.
const EXCEPTIONAL_SHIFT_PERIOD: usize = 16;

/// All eigenvalues of a square matrix, with multiplicity, in solver order.
pub fn eigenvalues(a: &Matrix) -> Result<Vec<Complex>, AnalysisError> {
  let n = a.dim();
  if n == 1 {
    return Ok(vec![a.get(0, 0)]);
  }

  let mut h = hessenberg(a);
  let scale = h.max_abs().max(1.0);
  let mut active = n;
  let mut budget = MAX_QR_SWEEPS * n;
  let mut stalled = 0usize;

  while active > 1 {
    for i in 1..active {
      let sub = h.get(i, i - 1);
      let local = h.get(i - 1, i - 1).abs() + h.get(i, i).abs();
      if sub.abs() <= DEFLATION_THRESHOLD * local.max(scale) {
        h.set(i, i - 1, Complex::ZERO);
      }
    }
    if h.get(active - 1, active - 2).abs() == 0.0 {
      active -= 1;
      stalled = 0;
      continue;
    }
    // start of the irreducible trailing block
    let mut start = active - 1;
    while start > 0 && h.get(start, start - 1).abs() != 0.0 {
      start -= 1;
    }
    if budget == 0 {
      return Err(AnalysisError::SolverDivergence(format!(
        "eigenvalue iteration did not converge within {} sweeps",
        MAX_QR_SWEEPS * n
      )));
    }
    budget -= 1;
    stalled += 1;
    let shift = if stalled % EXCEPTIONAL_SHIFT_PERIOD == 0 {
      h.get(active - 1, active - 1)
        + Complex::real(0.75 * h.get(active - 1, active - 2).abs())
    } else {
      wilkinson_shift(&h, active)
    };
    qr_step(&mut h, start, active, shift);
  }

  Ok((0..n).map(|i| h.get(i, i)).collect())
}

/// Householder reduction to upper Hessenberg form (a similarity, so the
/// spectrum is preserved).
fn hessenberg(a: &Matrix) -> Matrix {
  let n = a.dim();
  let mut h = a.clone();
  for k in 0..n.saturating_sub(2) {
    let norm_sq: f64 = (k + 1..n)
      .map(|i| {
        let z = h.get(i, k);
        z.re * z.re + z.im * z.im
      })
      .sum();
    let norm = norm_sq.sqrt();
    if norm <= f64::MIN_POSITIVE {
      continue;
    }
    let x0 = h.get(k + 1, k);
    let phase = if x0.abs() > 0.0 {
      x0.scale(1.0 / x0.abs())
    } else {
      Complex::ONE
    };
    // alpha chosen opposite in phase to x0 so v = x - alpha*e1 never cancels
    let alpha = phase.scale(-norm);
    let mut v: Vec<Complex> = (k + 1..n).map(|i| h.get(i, k)).collect();
    v[0] = v[0] - alpha;
    let v_norm_sq: f64 = v.iter().map(|z| z.re * z.re + z.im * z.im).sum();
    if v_norm_sq <= f64::MIN_POSITIVE {
      continue;
    }
    let beta = 2.0 / v_norm_sq;

    // left: H <- (I - beta v v^H) H, rows k+1..n
    for j in k..n {
      let mut w = Complex::ZERO;
      for (t, vi) in v.iter().enumerate() {
        w = w + vi.conj() * h.get(k + 1 + t, j);
      }
      let w = w.scale(beta);
      for (t, vi) in v.iter().enumerate() {
        let cur = h.get(k + 1 + t, j);
        h.set(k + 1 + t, j, cur - *vi * w);
      }
    }
    // right: H <- H (I - beta v v^H), columns k+1..n
    for i in 0..n {
      let mut w = Complex::ZERO;
      for (t, vi) in v.iter().enumerate() {
        w = w + h.get(i, k + 1 + t) * *vi;
      }
      let w = w.scale(beta);
      for (t, vi) in v.iter().enumerate() {
        let cur = h.get(i, k + 1 + t);
        h.set(i, k + 1 + t, cur - w * vi.conj());
      }
    }
    // the reflector maps the column exactly onto alpha*e1
    h.set(k + 1, k, alpha);
    for i in k + 2..n {
      h.set(i, k, Complex::ZERO);
    }
  }
  h
}

/// Eigenvalue of the trailing 2x2 block closest to the bottom-right entry.
fn wilkinson_shift(h: &Matrix, end: usize) -> Complex {
  let a = h.get(end - 2, end - 2);
  let b = h.get(end - 2, end - 1);
  let c = h.get(end - 1, end - 2);
  let d = h.get(end - 1, end - 1);
  let half_trace = (a + d).scale(0.5);
  let det = a * d - b * c;
  let disc = (half_trace * half_trace - det).sqrt();
  let r1 = half_trace + disc;
  let r2 = half_trace - disc;
  if (r1 - d).abs() <= (r2 - d).abs() {
    r1
  } else {
    r2
  }
}

/// One explicit shifted QR sweep on the block `start..end`:
/// H - mu*I = QR, then H <- RQ + mu*I. Givens rotations are applied to the
/// full rows/columns so the step stays a similarity on the whole matrix.
fn qr_step(h: &mut Matrix, start: usize, end: usize, shift: Complex) {
  let n = h.dim();
  for i in start..end {
    h.set(i, i, h.get(i, i) - shift);
  }
  let mut rotations: Vec<(f64, Complex)> = Vec::with_capacity(end - start);
  for i in start..end - 1 {
    let (c, s) = givens(h.get(i, i), h.get(i + 1, i));
    for j in i..n {
      let a0 = h.get(i, j);
      let b0 = h.get(i + 1, j);
      h.set(i, j, a0.scale(c) + s * b0);
      h.set(i + 1, j, b0.scale(c) - s.conj() * a0);
    }
    h.set(i + 1, i, Complex::ZERO);
    rotations.push((c, s));
  }
  for (offset, (c, s)) in rotations.iter().enumerate() {
    let i = start + offset;
    for r in 0..(i + 2).min(n) {
      let a0 = h.get(r, i);
      let b0 = h.get(r, i + 1);
      h.set(r, i, a0.scale(*c) + b0 * s.conj());
      h.set(r, i + 1, b0.scale(*c) - a0 * *s);
    }
  }
  for i in start..end {
    h.set(i, i, h.get(i, i) + shift);
  }
}

/// Rotation G = [[c, s], [-conj(s), c]] with real c such that
/// G * [f, g]^T = [r, 0]^T.
fn givens(f: Complex, g: Complex) -> (f64, Complex) {
  let af = f.abs();
  let ag = g.abs();
  if ag == 0.0 {
    return (1.0, Complex::ZERO);
  }
  if af == 0.0 {
    return (0.0, g.conj().scale(1.0 / ag));
  }
  let d = af.hypot(ag);
  let c = af / d;
  let phase = f.scale(1.0 / af);
  let s = phase * g.conj().scale(1.0 / d);
  (c, s)
}
