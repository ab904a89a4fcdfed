use super::*;

#[test]
fn jordan_block_decomposes_as_itself() {
  let a = m(&[vec![5.0, 1.0], vec![0.0, 5.0]]);
  let d = jordan_form(&a).unwrap();
  assert!(d.reconstruction_ok());
  assert!((d.j.get(0, 0) - Complex::real(5.0)).abs() < 1e-8);
  assert!((d.j.get(1, 1) - Complex::real(5.0)).abs() < 1e-8);
  assert!((d.j.get(0, 1) - Complex::ONE).abs() < 1e-8);
  assert!(d.j.get(1, 0).abs() < 1e-12);
}

#[test]
fn defective_block_plus_simple_eigenvalue() {
  let a = m(&[
    vec![2.0, 1.0, 0.0],
    vec![0.0, 2.0, 0.0],
    vec![0.0, 0.0, 3.0],
  ]);
  let d = jordan_form(&a).unwrap();
  assert!(d.reconstruction_ok());
  // one 2-block at 2, one 1-block at 3; superdiagonal 1 only inside the
  // 2-block
  let mut superdiagonal_ones = 0;
  for i in 0..2 {
    if (d.j.get(i, i + 1) - Complex::ONE).abs() < 1e-8 {
      superdiagonal_ones += 1;
    }
  }
  assert_eq!(superdiagonal_ones, 1);
  let mut diag: Vec<f64> = (0..3).map(|i| d.j.get(i, i).re).collect();
  diag.sort_by(|x, y| x.partial_cmp(y).unwrap());
  assert!((diag[0] - 2.0).abs() < 1e-8);
  assert!((diag[1] - 2.0).abs() < 1e-8);
  assert!((diag[2] - 3.0).abs() < 1e-8);
}

#[test]
fn nilpotent_matrix_gets_a_single_full_block() {
  let a = m(&[
    vec![0.0, 1.0, 0.0],
    vec![0.0, 0.0, 1.0],
    vec![0.0, 0.0, 0.0],
  ]);
  let d = jordan_form(&a).unwrap();
  assert!(d.reconstruction_ok());
  for i in 0..3 {
    assert!(d.j.get(i, i).abs() < 1e-8);
  }
  assert!((d.j.get(0, 1) - Complex::ONE).abs() < 1e-8);
  assert!((d.j.get(1, 2) - Complex::ONE).abs() < 1e-8);
}

#[test]
fn diagonalizable_input_yields_a_diagonal_jordan_matrix() {
  let a = m(&[vec![2.0, 0.0], vec![0.0, 3.0]]);
  let d = jordan_form(&a).unwrap();
  assert!(d.reconstruction_ok());
  assert!(d.j.get(0, 1).abs() < 1e-12);
  assert!(d.j.get(1, 0).abs() < 1e-12);
}

#[test]
fn jordan_reconstruction_holds_for_complex_spectra() {
  let a = m(&[vec![0.0, -1.0], vec![1.0, 0.0]]);
  let d = jordan_form(&a).unwrap();
  assert!(d.reconstruction_ok());
  // distinct eigenvalues, so no superdiagonal 1s
  assert!(d.j.get(0, 1).abs() < 1e-8);
}

#[test]
fn jordan_exists_where_diagonalization_does_not() {
  let a = m(&[vec![5.0, 1.0], vec![0.0, 5.0]]);
  assert!(matches!(
    diagonalize(&a).unwrap(),
    Analysis::NotDiagonalizable { .. }
  ));
  assert!(jordan_form(&a).is_ok());
}

#[test]
fn p_times_p_inv_is_the_identity() {
  let a = m(&[
    vec![2.0, 1.0, 0.0],
    vec![0.0, 2.0, 0.0],
    vec![0.0, 0.0, 3.0],
  ]);
  let d = jordan_form(&a).unwrap();
  let identity = d.p.matmul(&d.p_inv);
  assert!(identity.max_abs_diff(&Matrix::identity(3)) < 1e-8);
}

#[test]
fn reconstruction_error_is_reported_alongside_the_matrices() {
  let a = m(&[vec![4.0, 1.0], vec![2.0, 3.0]]);
  let d = jordan_form(&a).unwrap();
  assert!(d.reconstruction_error >= 0.0);
  assert_eq!(d.reconstruction_error, d.reconstructed.max_abs_diff(&a));
}
