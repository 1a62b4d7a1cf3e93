use crate::error::Result;
use crate::loss::batch_size;
use crate::math::matrix::{Matrix, EPSILON};

/// Categorical cross-entropy loss for use with a Softmax output layer.
pub struct CrossEntropyLoss;

impl CrossEntropyLoss {
    /// Computes the mean cross-entropy over the batch:
    ///   L = -sum(expected * log(clamp(predicted, eps, 1 - eps))) / N
    ///
    /// `predicted` — softmax probabilities, shape [N, n_classes]
    /// `expected`  — one-hot (or soft) targets, same shape
    pub fn loss(predicted: &Matrix, expected: &Matrix) -> Result<f64> {
        let n = batch_size("cross_entropy", predicted, expected)?;
        let total: f64 = predicted
            .as_slice()
            .iter()
            .zip(expected.as_slice())
            .map(|(&p, &e)| -e * p.clamp(EPSILON, 1.0 - EPSILON).ln())
            .sum();
        Ok(total / n)
    }

    /// Gradient of the combined Softmax + cross-entropy w.r.t. the pre-softmax
    /// logits, averaged over the batch:
    ///   ∂L/∂z = (predicted - expected) / N
    ///
    /// Assumes `predicted` is already a softmax output.
    pub fn derivative(predicted: &Matrix, expected: &Matrix) -> Result<Matrix> {
        let n = batch_size("cross_entropy_derivative", predicted, expected)?;
        Ok(predicted.try_sub(expected)? / n)
    }
}
