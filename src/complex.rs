//! Minimal complex scalar for the analysis core.
//!
//! The solver, rank and transform routines all compute over `Complex` so
//! that real and complex spectra flow through a single code path; a real
//! input matrix simply carries a zero imaginary part everywhere.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
  pub re: f64,
  pub im: f64,
}

impl Complex {
  pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
  pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };

  pub fn new(re: f64, im: f64) -> Self {
    Complex { re, im }
  }

  /// A purely real value.
  pub fn real(re: f64) -> Self {
    Complex { re, im: 0.0 }
  }

  /// Modulus |z|.
  pub fn abs(self) -> f64 {
    self.re.hypot(self.im)
  }

  pub fn conj(self) -> Self {
    Complex::new(self.re, -self.im)
  }

  /// Multiply by a real factor.
  pub fn scale(self, k: f64) -> Self {
    Complex::new(self.re * k, self.im * k)
  }

  /// Principal square root (branch cut on the negative real axis).
  pub fn sqrt(self) -> Self {
    if self.re == 0.0 && self.im == 0.0 {
      return Complex::ZERO;
    }
    let r = self.abs();
    let re = ((r + self.re) / 2.0).sqrt();
    let im = ((r - self.re) / 2.0).sqrt();
    Complex::new(re, if self.im < 0.0 { -im } else { im })
  }

  pub fn is_finite(self) -> bool {
    self.re.is_finite() && self.im.is_finite()
  }
}

impl Add for Complex {
  type Output = Complex;
  fn add(self, rhs: Complex) -> Complex {
    Complex::new(self.re + rhs.re, self.im + rhs.im)
  }
}

impl Sub for Complex {
  type Output = Complex;
  fn sub(self, rhs: Complex) -> Complex {
    Complex::new(self.re - rhs.re, self.im - rhs.im)
  }
}

impl Mul for Complex {
  type Output = Complex;
  fn mul(self, rhs: Complex) -> Complex {
    Complex::new(
      self.re * rhs.re - self.im * rhs.im,
      self.re * rhs.im + self.im * rhs.re,
    )
  }
}

impl Div for Complex {
  type Output = Complex;
  fn div(self, rhs: Complex) -> Complex {
    let denom = rhs.re * rhs.re + rhs.im * rhs.im;
    Complex::new(
      (self.re * rhs.re + self.im * rhs.im) / denom,
      (self.im * rhs.re - self.re * rhs.im) / denom,
    )
  }
}

impl Neg for Complex {
  type Output = Complex;
  fn neg(self) -> Complex {
    Complex::new(-self.re, -self.im)
  }
}

impl fmt::Display for Complex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.im == 0.0 {
      write!(f, "{}", self.re)
    } else if self.im < 0.0 {
      write!(f, "{}-{}i", self.re, -self.im)
    } else {
      write!(f, "{}+{}i", self.re, self.im)
    }
  }
}
