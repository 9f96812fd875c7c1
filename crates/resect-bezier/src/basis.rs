//! Bernstein basis evaluation.

use nalgebra::DMatrix;

/// Evaluate the `degree + 1` Bernstein basis polynomials at `t`.
///
/// Uses the de Casteljau recurrence, which only ever forms convex
/// combinations of `t` and `1 - t` and so stays stable on `[0, 1]`.
pub fn evaluate_basis_bezier(t: f64, degree: usize) -> Vec<f64> {
    let mut b = vec![0.0; degree + 1];
    b[0] = 1.0;
    let t1 = 1.0 - t;
    for j in 1..=degree {
        let mut saved = 0.0;
        for k in 0..j {
            let temp = b[k];
            b[k] = saved + t1 * temp;
            saved = t * temp;
        }
        b[j] = saved;
    }
    b
}

/// Basis matrix with one row per parameter value: `N[r][k] = B_k(params[r])`.
pub fn basis_matrix(params: &[f64], degree: usize) -> DMatrix<f64> {
    let mut n = DMatrix::zeros(params.len(), degree + 1);
    for (r, &t) in params.iter().enumerate() {
        for (k, b) in evaluate_basis_bezier(t, degree).into_iter().enumerate() {
            n[(r, k)] = b;
        }
    }
    n
}

/// Binomial coefficients `C(n, 0..=n)`.
pub(crate) fn binomials(n: usize) -> Vec<f64> {
    let mut c = vec![1.0; n + 1];
    for k in 1..n {
        c[k] = c[k - 1] * (n - k + 1) as f64 / k as f64;
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_cubic_endpoints() {
        assert_eq!(evaluate_basis_bezier(0.0, 3), vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(evaluate_basis_bezier(1.0, 3), vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_cubic_midpoint() {
        let b = evaluate_basis_bezier(0.5, 3);
        let expected = [0.125, 0.375, 0.375, 0.125];
        for (got, want) in b.iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_matches_closed_form() {
        for degree in 1..6 {
            let c = binomials(degree);
            for step in 0..=10 {
                let t = step as f64 / 10.0;
                let b = evaluate_basis_bezier(t, degree);
                for k in 0..=degree {
                    let closed = c[k] * t.powi(k as i32) * (1.0 - t).powi((degree - k) as i32);
                    assert_relative_eq!(b[k], closed, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_binomials() {
        assert_eq!(binomials(3), vec![1.0, 3.0, 3.0, 1.0]);
        assert_eq!(binomials(0), vec![1.0]);
        assert_eq!(binomials(4), vec![1.0, 4.0, 6.0, 4.0, 1.0]);
    }

    #[test]
    fn test_basis_matrix_shape() {
        let n = basis_matrix(&[0.0, 0.25, 0.5, 1.0], 3);
        assert_eq!(n.shape(), (4, 4));
        assert_relative_eq!(n[(0, 0)], 1.0);
        assert_relative_eq!(n[(3, 3)], 1.0);
    }

    proptest! {
        #[test]
        fn prop_partition_of_unity(t in 0.0f64..=1.0, degree in 1usize..8) {
            let b = evaluate_basis_bezier(t, degree);
            prop_assert_eq!(b.len(), degree + 1);
            let sum: f64 = b.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-12);
            prop_assert!(b.iter().all(|&v| v >= 0.0));
        }
    }
}
