use super::*;

#[test]
fn identity_is_diagonalizable_with_full_multiplicity() {
  let a = m(&[
    vec![1.0, 0.0, 0.0, 0.0],
    vec![0.0, 1.0, 0.0, 0.0],
    vec![0.0, 0.0, 1.0, 0.0],
    vec![0.0, 0.0, 0.0, 1.0],
  ]);
  let spectrum = analyze(&a).unwrap();
  assert!(spectrum.is_diagonalizable());
  assert_eq!(spectrum.eigenvalues.len(), 1);
  assert_has_eigenvalue(&spectrum, 1.0, 0.0);
  assert_eq!(spectrum.eigenvalues[0].algebraic, 4);
  assert_eq!(spectrum.eigenvalues[0].geometric, 4);
  assert_eq!(spectrum.independent_vectors, 4);
}

#[test]
fn distinct_diagonal_entries_are_diagonalizable() {
  let a = m(&[vec![2.0, 0.0], vec![0.0, 3.0]]);
  let spectrum = analyze(&a).unwrap();
  assert!(spectrum.is_diagonalizable());
  assert_eq!(spectrum.eigenvalues.len(), 2);
  assert_has_eigenvalue(&spectrum, 2.0, 0.0);
  assert_has_eigenvalue(&spectrum, 3.0, 0.0);
  assert_eq!(spectrum.independent_vectors, 2);
}

#[test]
fn symmetric_matrix_is_diagonalizable() {
  let a = m(&[vec![2.0, 1.0], vec![1.0, 2.0]]);
  let spectrum = analyze(&a).unwrap();
  assert!(spectrum.is_diagonalizable());
  assert_has_eigenvalue(&spectrum, 1.0, 0.0);
  assert_has_eigenvalue(&spectrum, 3.0, 0.0);
}

#[test]
fn jordan_block_is_not_diagonalizable() {
  let a = m(&[vec![5.0, 1.0], vec![0.0, 5.0]]);
  let spectrum = analyze(&a).unwrap();
  assert!(!spectrum.is_diagonalizable());
  assert_eq!(spectrum.eigenvalues.len(), 1);
  assert_has_eigenvalue(&spectrum, 5.0, 0.0);
  assert_eq!(spectrum.eigenvalues[0].algebraic, 2);
  assert_eq!(spectrum.eigenvalues[0].geometric, 1);
  assert_eq!(spectrum.independent_vectors, 1);
}

#[test]
fn defective_block_plus_simple_eigenvalue() {
  let a = m(&[
    vec![2.0, 1.0, 0.0],
    vec![0.0, 2.0, 0.0],
    vec![0.0, 0.0, 3.0],
  ]);
  let spectrum = analyze(&a).unwrap();
  assert!(!spectrum.is_diagonalizable());
  assert_eq!(spectrum.eigenvalues.len(), 2);
  assert_has_eigenvalue(&spectrum, 2.0, 0.0);
  assert_has_eigenvalue(&spectrum, 3.0, 0.0);
  assert_eq!(spectrum.independent_vectors, 2);
}

#[test]
fn rotation_matrix_is_diagonalizable_over_the_complex_numbers() {
  let a = m(&[vec![0.0, -1.0], vec![1.0, 0.0]]);
  let spectrum = analyze(&a).unwrap();
  assert!(spectrum.is_diagonalizable());
  assert_has_eigenvalue(&spectrum, 0.0, 1.0);
  assert_has_eigenvalue(&spectrum, 0.0, -1.0);
}

#[test]
fn nonsymmetric_matrix_with_distinct_real_spectrum() {
  let a = m(&[vec![4.0, 1.0], vec![2.0, 3.0]]);
  let spectrum = analyze(&a).unwrap();
  assert!(spectrum.is_diagonalizable());
  assert_has_eigenvalue(&spectrum, 5.0, 0.0);
  assert_has_eigenvalue(&spectrum, 2.0, 0.0);
}

#[test]
fn nilpotent_matrix_has_a_single_defective_eigenvalue_at_zero() {
  let a = m(&[
    vec![0.0, 1.0, 0.0],
    vec![0.0, 0.0, 1.0],
    vec![0.0, 0.0, 0.0],
  ]);
  let spectrum = analyze(&a).unwrap();
  assert!(!spectrum.is_diagonalizable());
  assert_eq!(spectrum.eigenvalues.len(), 1);
  assert_has_eigenvalue(&spectrum, 0.0, 0.0);
  assert_eq!(spectrum.eigenvalues[0].geometric, 1);
}

#[test]
fn irrational_spectrum_off_the_rounding_grid_is_analyzed() {
  // eigenvalues (5 +- sqrt(33)) / 2 do not land on the clustering grid
  let a = m(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
  let spectrum = analyze(&a).unwrap();
  assert!(spectrum.is_diagonalizable());
  assert_eq!(spectrum.independent_vectors, 2);
  assert_has_eigenvalue(&spectrum, 5.372_281_323_269_014, 0.0);
  assert_has_eigenvalue(&spectrum, -0.372_281_323_269_014_3, 0.0);
}

#[test]
fn golden_ratio_spectrum_is_analyzed() {
  // eigenvalues (1 +- sqrt(5)) / 2
  let a = m(&[vec![0.0, 1.0], vec![1.0, 1.0]]);
  let spectrum = analyze(&a).unwrap();
  assert!(spectrum.is_diagonalizable());
  assert_has_eigenvalue(&spectrum, 1.618_033_988_749_895, 0.0);
  assert_has_eigenvalue(&spectrum, -0.618_033_988_749_895, 0.0);
}

#[test]
fn large_magnitude_eigenvalue_survives_analysis() {
  let a = m(&[vec![1.0e13]]);
  let spectrum = analyze(&a).unwrap();
  assert!(spectrum.is_diagonalizable());
  assert_eq!(spectrum.independent_vectors, 1);
  assert!((spectrum.eigenvalues[0].value.re - 1.0e13).abs() < 1.0);
}

#[test]
fn analysis_is_deterministic_across_repeated_calls() {
  let a = m(&[vec![4.0, 1.0], vec![2.0, 3.0]]);
  let first = analyze(&a).unwrap();
  let second = analyze(&a).unwrap();
  assert_eq!(first.is_diagonalizable(), second.is_diagonalizable());
  assert_eq!(first.independent_vectors, second.independent_vectors);
  assert_eq!(first.eigenvalues.len(), second.eigenvalues.len());
  for (x, y) in first.eigenvalues.iter().zip(second.eigenvalues.iter()) {
    assert!((x.value - y.value).abs() < 1e-12);
    assert_eq!(x.algebraic, y.algebraic);
    assert_eq!(x.geometric, y.geometric);
  }
}

#[test]
fn one_by_one_matrix() {
  let a = m(&[vec![7.0]]);
  let spectrum = analyze(&a).unwrap();
  assert!(spectrum.is_diagonalizable());
  assert_eq!(spectrum.independent_vectors, 1);
  assert_has_eigenvalue(&spectrum, 7.0, 0.0);
}
