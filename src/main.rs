use log::info;
use ndarray::{Array2, ArrayView2};
use ndarray_rand::{rand_distr::Uniform, RandomExt};
use rand::Rng;

use softmax_classifier::{grad_check, softmax_loss_naive, softmax_loss_vectorized, Result};

fn main() -> Result<()> {
    env_logger::init();

    let (num_train, dims, classes) = (50, 10, 4);
    let reg = 0.1;

    let w = Array2::random((dims, classes), Uniform::new(-0.01, 0.01).unwrap());
    let x = Array2::random((num_train, dims), Uniform::new(-1.0, 1.0).unwrap());
    let y: Vec<usize> = (0..num_train)
        .map(|_| rand::rng().random_range(0..classes))
        .collect();

    let (loss_naive, dw_naive) = softmax_loss_naive(w.view(), x.view(), &y, reg)?;
    let (loss_vec, dw_vec) = softmax_loss_vectorized(w.view(), x.view(), &y, reg)?;

    info!("naive loss: {loss_naive}");
    info!("vectorized loss: {loss_vec}");
    info!(
        "naive vs vectorized gradient, max rel error: {:e}",
        grad_check::rel_error(dw_naive.view(), dw_vec.view())
    );

    let f = |wv: ArrayView2<f64>| {
        softmax_loss_vectorized(wv, x.view(), &y, reg)
            .map(|(loss, _)| loss)
            .unwrap_or(f64::NAN)
    };
    let num_grad = grad_check::numerical_gradient(&f, w.view(), 1e-5);

    info!(
        "analytic vs numerical gradient, max rel error: {:e}",
        grad_check::rel_error(dw_vec.view(), num_grad.view())
    );

    Ok(())
}
