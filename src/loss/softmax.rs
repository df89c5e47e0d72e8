use ndarray::{Array2, ArrayView2, Axis};

use crate::{ClassifierErr, Result};

/// Softmax classification loss and its gradient, computed with explicit
/// loops over examples and classes.
///
/// Scores are shifted by their per-example maximum before exponentiating, so
/// the largest shifted score is 0 and the exponentials cannot overflow. The
/// shift does not change the resulting probabilities.
///
/// An example whose true-class probability underflows to exactly 0 is left
/// out of the cross-entropy sum instead of contributing an infinite loss.
///
/// # Arguments
/// * `w` - The weight matrix, one column per class; shape (dims, classes).
/// * `x` - The input data, one example per row; shape (examples, dims).
/// * `y` - The label of each example, each in `0..classes`.
/// * `reg` - The L2 regularization strength, expected to be non-negative.
///
/// # Returns
/// The scalar loss and the gradient of the loss with respect to `w`.
///
/// # Errors
/// Returns `ClassifierErr::ShapeMismatch` if the dimensions of `w`, `x` and
/// `y` don't agree, and `ClassifierErr::EmptyBatch` if `x` has no rows.
///
/// # Panics
/// Panics if a label is outside `0..classes`; labels are not validated.
pub fn softmax_loss_naive(
    w: ArrayView2<f64>,
    x: ArrayView2<f64>,
    y: &[usize],
    reg: f64,
) -> Result<(f64, Array2<f64>)> {
    check_dims(w, x, y)?;

    let num_train = x.nrows();
    let num_classes = w.ncols();
    let mut loss = 0.0;
    let mut dw = Array2::<f64>::zeros(w.raw_dim());

    for (x_i, &y_i) in x.outer_iter().zip(y) {
        let mut scores = x_i.dot(&w);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        scores.mapv_inplace(|s| s - max);

        let exps = scores.mapv(f64::exp);
        let exp_sum = exps.sum();

        let prob_true = exps[y_i] / exp_sum;
        if prob_true != 0.0 {
            loss -= prob_true.ln();
        }

        for j in 0..num_classes {
            let prob = exps[j] / exp_sum;
            let indicator = if j == y_i { 1.0 } else { 0.0 };
            dw.column_mut(j).scaled_add(prob - indicator, &x_i);
        }
    }

    loss /= num_train as f64;
    loss += 0.5 * reg * w.pow2().sum();

    dw.mapv_inplace(|g| g / num_train as f64);
    dw.scaled_add(reg, &w);

    Ok((loss, dw))
}

/// Softmax classification loss and its gradient, computed with whole-matrix
/// operations.
///
/// Same contract as [`softmax_loss_naive`]: the two implementations agree on
/// every input up to floating point rounding. Here the per-example score
/// shift is a broadcasted row-max subtraction and the whole gradient is one
/// matrix product `xᵀ · (probs - onehot(y))`.
///
/// # Arguments
/// * `w` - The weight matrix, one column per class; shape (dims, classes).
/// * `x` - The input data, one example per row; shape (examples, dims).
/// * `y` - The label of each example, each in `0..classes`.
/// * `reg` - The L2 regularization strength, expected to be non-negative.
///
/// # Returns
/// The scalar loss and the gradient of the loss with respect to `w`.
///
/// # Errors
/// Returns `ClassifierErr::ShapeMismatch` if the dimensions of `w`, `x` and
/// `y` don't agree, and `ClassifierErr::EmptyBatch` if `x` has no rows.
///
/// # Panics
/// Panics if a label is outside `0..classes`; labels are not validated.
pub fn softmax_loss_vectorized(
    w: ArrayView2<f64>,
    x: ArrayView2<f64>,
    y: &[usize],
    reg: f64,
) -> Result<(f64, Array2<f64>)> {
    check_dims(w, x, y)?;

    let num_train = x.nrows();

    let mut scores = x.dot(&w);
    let row_max = scores.fold_axis(Axis(1), f64::NEG_INFINITY, |&m, &s| m.max(s));
    scores -= &row_max.insert_axis(Axis(1));

    let mut probs = scores.mapv(f64::exp);
    let row_sum = probs.sum_axis(Axis(1));
    probs /= &row_sum.insert_axis(Axis(1));

    let mut loss = 0.0;
    for (i, &y_i) in y.iter().enumerate() {
        let prob_true = probs[[i, y_i]];
        if prob_true != 0.0 {
            loss -= prob_true.ln();
        }
    }
    loss /= num_train as f64;
    loss += 0.5 * reg * w.pow2().sum();

    // turn probs into the per-score error signal probs - onehot(y)
    for (i, &y_i) in y.iter().enumerate() {
        probs[[i, y_i]] -= 1.0;
    }
    let mut dw = x.t().dot(&probs);
    dw.mapv_inplace(|g| g / num_train as f64);
    dw.scaled_add(reg, &w);

    Ok((loss, dw))
}

fn check_dims(w: ArrayView2<f64>, x: ArrayView2<f64>, y: &[usize]) -> Result<()> {
    if x.nrows() == 0 {
        return Err(ClassifierErr::EmptyBatch);
    }

    if w.nrows() != x.ncols() {
        return Err(ClassifierErr::ShapeMismatch {
            a: "weights",
            b: "data",
            got: w.nrows(),
            expected: x.ncols(),
        });
    }

    if y.len() != x.nrows() {
        return Err(ClassifierErr::ShapeMismatch {
            a: "labels",
            b: "data",
            got: y.len(),
            expected: x.nrows(),
        });
    }

    Ok(())
}
