//! Integration tests for the symmetric product kernels.

use approx::assert_relative_eq;
use matrust::{
    linalg::{
        inner_reorder, inner_reorder_upper, inner_small, mult, mult_inner, mult_trans_a,
        mult_trans_a_reorder, mult_trans_b, outer, transpose,
    },
    matrix, random, KernelConfig, Matrix, MatrustError,
};
use rand::{rngs::StdRng, SeedableRng};

fn random_matrix(num_rows: usize, num_cols: usize, seed: u64) -> Matrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    random::uniform(num_rows, num_cols, -1.0, 1.0, &mut rng).unwrap()
}

fn assert_same(a: &Matrix<f64>, b: &Matrix<f64>) {
    assert_eq!(a.shape(), b.shape());
    for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
        assert_relative_eq!(x, y, epsilon = 1e-10);
    }
}

#[test]
fn test_outer_matches_generic() {
    for &(rows, cols) in &[(20, 10), (10, 20), (1, 7), (7, 1)] {
        let a = random_matrix(rows, cols, 234);
        let mut expected = Matrix::new(rows, rows);
        mult_trans_b(&a, &a, &mut expected).unwrap();

        let mut found = Matrix::new(rows, rows);
        outer(&a, &mut found).unwrap();
        assert_same(&expected, &found);
    }
}

#[test]
fn test_inner_variants_match_generic() {
    for &(rows, cols) in &[(20, 10), (10, 20), (1, 7), (7, 1)] {
        let a = random_matrix(rows, cols, 876);
        let mut expected = Matrix::new(cols, cols);
        mult_trans_a(&a, &a, &mut expected).unwrap();

        let mut small = Matrix::new(cols, cols);
        inner_small(&a, &mut small).unwrap();
        assert_same(&expected, &small);

        let mut reorder = Matrix::new(cols, cols);
        inner_reorder(&a, &mut reorder).unwrap();
        assert_same(&expected, &reorder);

        let mut generic_reorder = Matrix::new(cols, cols);
        mult_trans_a_reorder(&a, &a, &mut generic_reorder).unwrap();
        assert_same(&expected, &generic_reorder);
    }
}

#[test]
fn test_inner_upper_only_touches_upper() {
    let a = random_matrix(20, 10, 55);
    let mut expected = Matrix::new(10, 10);
    mult_trans_a(&a, &a, &mut expected).unwrap();

    let sentinel = -12345.0;
    let mut found = Matrix::new(10, 10);
    found.fill(sentinel);
    inner_reorder_upper(&a, &mut found).unwrap();

    for i in 0..10 {
        for j in 0..10 {
            if j >= i {
                assert_relative_eq!(found[(i, j)], expected[(i, j)], epsilon = 1e-10);
            } else {
                assert_eq!(found[(i, j)], sentinel);
            }
        }
    }
}

#[test]
fn test_concrete_products() {
    let a = matrix![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];

    let mut aat = Matrix::new(3, 3);
    outer(&a, &mut aat).unwrap();
    assert_eq!(
        aat,
        matrix![[5.0, 11.0, 17.0], [11.0, 25.0, 39.0], [17.0, 39.0, 61.0]]
    );

    let mut ata = Matrix::new(2, 2);
    inner_small(&a, &mut ata).unwrap();
    assert_eq!(ata, matrix![[35.0, 44.0], [44.0, 56.0]]);
}

#[test]
fn test_wrong_target_is_rejected() {
    let a = random_matrix(4, 3, 1);
    let mut c = Matrix::new(4, 4);
    assert!(matches!(
        inner_small(&a, &mut c),
        Err(MatrustError::DimensionMismatch { .. })
    ));
    assert!(inner_reorder(&a, &mut c).is_err());
    assert!(inner_reorder_upper(&a, &mut c).is_err());

    let mut c = Matrix::new(3, 3);
    assert!(outer(&a, &mut c).is_err());
}

#[test]
fn test_mult_inner_both_kernels() {
    let a = random_matrix(15, 12, 99);
    let expected = {
        let at = transpose(&a);
        let mut c = Matrix::new(12, 12);
        mult_trans_b(&at, &at, &mut c).unwrap();
        c
    };

    for switch in [1, 1000] {
        let config = KernelConfig::default().with_mult_inner_switch(switch);
        let mut c = Matrix::new(12, 12);
        mult_inner(&a, &mut c, &config).unwrap();
        assert_same(&expected, &c);
    }
}

#[test]
fn test_single_precision_kernels() {
    let mut rng = StdRng::seed_from_u64(5);
    let a: Matrix<f32> = random::uniform(8, 6, -1.0, 1.0, &mut rng).unwrap();
    let mut expected = Matrix::new(6, 6);
    mult_trans_a(&a, &a, &mut expected).unwrap();
    let mut found = Matrix::new(6, 6);
    inner_reorder(&a, &mut found).unwrap();
    for (x, y) in expected.as_slice().iter().zip(found.as_slice()) {
        assert_relative_eq!(x, y, epsilon = 1e-4);
    }
}

fn assert_same_with_nan(a: &Matrix<f64>, b: &Matrix<f64>) {
    assert_eq!(a.shape(), b.shape());
    for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
        if x.is_nan() {
            assert!(y.is_nan(), "expected NaN, got {}", y);
        } else {
            assert_eq!(x, y);
        }
    }
}

#[test]
fn test_non_finite_input_propagates() {
    // the (0, 1) entry of a·aᵗ holds 0·inf
    let a = matrix![[0.0, 1.0], [f64::INFINITY, 2.0]];
    let mut expected = Matrix::new(2, 2);
    mult_trans_b(&a, &a, &mut expected).unwrap();
    assert!(expected[(0, 1)].is_nan());

    let mut found = Matrix::new(2, 2);
    outer(&a, &mut found).unwrap();
    assert_same_with_nan(&expected, &found);

    let mut generic = Matrix::new(2, 2);
    mult(&a, &transpose(&a), &mut generic).unwrap();
    assert_same_with_nan(&expected, &generic);

    let at = transpose(&a);
    let mut inner = Matrix::new(2, 2);
    inner_small(&at, &mut inner).unwrap();
    assert_same_with_nan(&expected, &inner);
    inner_reorder(&at, &mut inner).unwrap();
    assert_same_with_nan(&expected, &inner);
}
