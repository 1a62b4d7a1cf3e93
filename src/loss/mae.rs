use crate::error::Result;
use crate::loss::batch_size;
use crate::math::matrix::Matrix;

pub struct MaeLoss;

impl MaeLoss {
    /// Scalar MAE: sum(|predicted - expected|) / N
    pub fn loss(predicted: &Matrix, expected: &Matrix) -> Result<f64> {
        let n = batch_size("mae", predicted, expected)?;
        Ok(predicted.try_sub(expected)?.abs().sum() / n)
    }

    /// Subgradient: sign(predicted - expected) / N, where sign(0) = +1.
    pub fn derivative(predicted: &Matrix, expected: &Matrix) -> Result<Matrix> {
        let n = batch_size("mae_derivative", predicted, expected)?;
        Ok(predicted.try_sub(expected)?.sign() / n)
    }
}
