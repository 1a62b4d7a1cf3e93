use crate::error::Result;
use crate::loss::batch_size;
use crate::math::matrix::Matrix;

pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: sum((predicted - expected)²) / (2·N), N = batch rows.
    pub fn loss(predicted: &Matrix, expected: &Matrix) -> Result<f64> {
        let n = batch_size("mse", predicted, expected)?;
        Ok(predicted.try_sub(expected)?.powi(2).sum() / (2.0 * n))
    }

    /// Gradient: (predicted - expected) / N. The 2 from the square cancels the ½ in `loss`.
    pub fn derivative(predicted: &Matrix, expected: &Matrix) -> Result<Matrix> {
        let n = batch_size("mse_derivative", predicted, expected)?;
        Ok(predicted.try_sub(expected)? / n)
    }
}
