#![cfg(test)]

use ndarray::{Array1, Array2, ArrayView2, Axis};
use ndarray_rand::{rand_distr::Uniform, RandomExt};
use rand::Rng;

use crate::{grad_check, softmax_loss_naive, softmax_loss_vectorized};

fn random_problem(
    num_train: usize,
    dims: usize,
    classes: usize,
) -> (Array2<f64>, Array2<f64>, Vec<usize>) {
    let w = Array2::random((dims, classes), Uniform::new(-1.0, 1.0).unwrap());
    let x = Array2::random((num_train, dims), Uniform::new(-1.0, 1.0).unwrap());
    let y = (0..num_train)
        .map(|_| rand::rng().random_range(0..classes))
        .collect();

    (w, x, y)
}

fn max_abs_diff(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    (a - b).mapv(f64::abs).fold(0.0, |m, &d| m.max(d))
}

#[test]
fn test_naive_and_vectorized_agree() {
    let (w, x, y) = random_problem(20, 6, 4);

    for reg in [0.0, 0.05, 1.0] {
        let (loss_n, dw_n) = softmax_loss_naive(w.view(), x.view(), &y, reg).unwrap();
        let (loss_v, dw_v) = softmax_loss_vectorized(w.view(), x.view(), &y, reg).unwrap();

        assert!(
            (loss_n - loss_v).abs() < 1e-7,
            "losses diverged at reg {reg}: {loss_n} vs {loss_v}"
        );
        assert!(
            max_abs_diff(&dw_n, &dw_v) < 1e-7,
            "gradients diverged at reg {reg}"
        );
    }
}

#[test]
fn test_analytic_gradient_matches_numerical() {
    let (w, x, y) = random_problem(10, 5, 3);

    for reg in [0.0, 0.1] {
        for loss_fn in [softmax_loss_naive, softmax_loss_vectorized] {
            let (_, dw) = loss_fn(w.view(), x.view(), &y, reg).unwrap();

            let f = |wv: ArrayView2<f64>| {
                loss_fn(wv, x.view(), &y, reg).map(|(loss, _)| loss).unwrap()
            };
            let num_grad = grad_check::numerical_gradient(&f, w.view(), 1e-5);

            let err = grad_check::rel_error(dw.view(), num_grad.view());
            assert!(err < 1e-5, "gradient check failed at reg {reg}: {err:e}");
        }
    }
}

#[test]
fn test_loss_is_non_negative() {
    let (w, x, y) = random_problem(15, 4, 5);

    for reg in [0.0, 0.5, 10.0] {
        for loss_fn in [softmax_loss_naive, softmax_loss_vectorized] {
            let (loss, _) = loss_fn(w.view(), x.view(), &y, reg).unwrap();
            assert!(loss >= 0.0, "got negative loss {loss} at reg {reg}");
        }
    }
}

#[test]
fn test_score_shift_leaves_loss_and_gradient_unchanged() {
    let (w, x, y) = random_problem(12, 5, 3);

    // adding the same column vector to every column of w shifts all class
    // scores of example i by x_i·u, which softmax is invariant to
    let u = Array1::random(5, Uniform::new(-2.0, 2.0).unwrap());
    let w_shifted = &w + &u.insert_axis(Axis(1));

    for loss_fn in [softmax_loss_naive, softmax_loss_vectorized] {
        let (loss, dw) = loss_fn(w.view(), x.view(), &y, 0.0).unwrap();
        let (loss_s, dw_s) = loss_fn(w_shifted.view(), x.view(), &y, 0.0).unwrap();

        assert!((loss - loss_s).abs() < 1e-7, "{loss} vs {loss_s}");
        assert!(max_abs_diff(&dw, &dw_s) < 1e-7);
    }
}
