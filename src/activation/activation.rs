use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Nonlinearity applied by a dense layer after its affine transform.
///
/// The kind is chosen once when the layer is built; every use site matches
/// exhaustively, so an unknown name can only fail at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationFunction {
    Tanh,
    Relu,
    /// Row-wise; every output row is a probability distribution.
    Softmax,
    Sigmoid,
    Identity,
}

impl ActivationFunction {
    pub fn apply(&self, m: &Matrix) -> Matrix {
        match self {
            ActivationFunction::Tanh => tanh(m),
            ActivationFunction::Relu => relu(m),
            ActivationFunction::Softmax => softmax(m),
            ActivationFunction::Sigmoid => sigmoid(m),
            ActivationFunction::Identity => m.clone(),
        }
    }

    /// Derivative evaluated at the pre-activation values `z`, not at the output.
    pub fn derivative(&self, z: &Matrix) -> Matrix {
        match self {
            ActivationFunction::Tanh => tanh_derivative(z),
            ActivationFunction::Relu => relu_derivative(z),
            ActivationFunction::Softmax => softmax_derivative(z),
            ActivationFunction::Sigmoid => sigmoid_derivative(z),
            ActivationFunction::Identity => Matrix::filled(z.rows(), z.cols(), 1.0),
        }
    }
}

impl FromStr for ActivationFunction {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "tanh" => Ok(ActivationFunction::Tanh),
            "relu" => Ok(ActivationFunction::Relu),
            "softmax" => Ok(ActivationFunction::Softmax),
            "sigmoid" => Ok(ActivationFunction::Sigmoid),
            "identity" => Ok(ActivationFunction::Identity),
            other => Err(Error::invalid(format!("unknown activation function '{other}'"))),
        }
    }
}

pub fn tanh(m: &Matrix) -> Matrix {
    m.map(f64::tanh)
}

/// `1 - tanh(z)^2`
pub fn tanh_derivative(z: &Matrix) -> Matrix {
    z.map(|x| {
        let t = x.tanh();
        1.0 - t * t
    })
}

pub fn relu(m: &Matrix) -> Matrix {
    m.map(|x| if x > 0.0 { x } else { 0.0 })
}

/// 1 for positive inputs, 0 otherwise (including exactly 0).
pub fn relu_derivative(z: &Matrix) -> Matrix {
    z.map(|x| if x > 0.0 { 1.0 } else { 0.0 })
}

pub fn sigmoid(m: &Matrix) -> Matrix {
    m.map(|x| 1.0 / (1.0 + (-x).exp()))
}

pub fn sigmoid_derivative(z: &Matrix) -> Matrix {
    z.map(|x| {
        let s = 1.0 / (1.0 + (-x).exp());
        s * (1.0 - s)
    })
}

/// Row-wise softmax. The row maximum is subtracted before exponentiating.
pub fn softmax(m: &Matrix) -> Matrix {
    let mut out = m.clone();
    let cols = m.cols();
    if cols == 0 {
        return out;
    }
    for row in out.as_mut_slice().chunks_mut(cols) {
        let row_max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        row.iter_mut().for_each(|x| *x = (*x - row_max).exp());
        let sum_exp: f64 = row.iter().sum();
        row.iter_mut().for_each(|x| *x /= sum_exp);
    }
    out
}

/// Diagonal approximation `s_j * (1 - s_j)` of the softmax Jacobian.
///
/// The cross-term `-s_i * s_j` is dropped. Paired with
/// `CrossEntropyLoss::derivative`, which already returns the combined
/// softmax + cross-entropy gradient, this scales that gradient a second time.
pub fn softmax_derivative(z: &Matrix) -> Matrix {
    softmax(z).map(|s| s * (1.0 - s))
}
