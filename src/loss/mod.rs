mod softmax;

pub use softmax::{softmax_loss_naive, softmax_loss_vectorized};
