use ndarray::{Array2, ArrayView2};

/// Numerical gradient of a scalar function of a matrix, using centered
/// differences on a scratch copy of `w`.
///
/// # Arguments
/// * `f` - The function to differentiate.
/// * `w` - The point to evaluate the gradient at.
/// * `h` - The step size of the centered differences.
///
/// # Returns
/// The gradient estimate `(f(w + h·e) - f(w - h·e)) / 2h`, entry by entry.
pub fn numerical_gradient<F>(f: &F, w: ArrayView2<f64>, h: f64) -> Array2<f64>
where
    F: Fn(ArrayView2<f64>) -> f64,
{
    let mut w = w.to_owned();
    let mut grad = Array2::<f64>::zeros(w.raw_dim());
    let (rows, cols) = w.dim();

    for d in 0..rows {
        for c in 0..cols {
            let orig = w[[d, c]];

            w[[d, c]] = orig + h;
            let fxph = f(w.view());
            w[[d, c]] = orig - h;
            let fxmh = f(w.view());
            w[[d, c]] = orig;

            grad[[d, c]] = (fxph - fxmh) / (2.0 * h);
        }
    }

    grad
}

/// Worst-case relative error between two matrices,
/// `max |a - b| / max(1e-8, |a| + |b|)`.
pub fn rel_error(a: ArrayView2<f64>, b: ArrayView2<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&ai, &bi)| (ai - bi).abs() / f64::max(1e-8, ai.abs() + bi.abs()))
        .fold(0.0, f64::max)
}
