pub mod mse;
pub mod mae;
pub mod cross_entropy;
pub mod loss_type;

pub use mse::MseLoss;
pub use mae::MaeLoss;
pub use cross_entropy::CrossEntropyLoss;
pub use loss_type::LossType;

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Checks that `predicted` and `expected` line up and returns the batch size N.
pub(crate) fn batch_size(op: &'static str, predicted: &Matrix, expected: &Matrix) -> Result<f64> {
    if predicted.shape() != expected.shape() {
        return Err(Error::ShapeMismatch {
            op,
            left: predicted.shape(),
            right: expected.shape(),
        });
    }
    if predicted.rows() == 0 {
        return Err(Error::invalid(format!("{op}: empty batch")));
    }
    Ok(predicted.rows() as f64)
}
