use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::loss::{CrossEntropyLoss, MaeLoss, MseLoss};
use crate::math::matrix::Matrix;

/// Selects which loss function the network trains against.
///
/// - `Mse`          — Mean-squared error (halved); pair with Identity or Tanh output.
/// - `Mae`          — Mean absolute error; pair with Identity output.
/// - `CrossEntropy` — Categorical cross-entropy; pair with Softmax output.
///   The gradient is the combined Softmax+CE gradient (predicted - expected) / N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    #[serde(alias = "mean_squared_error")]
    Mse,
    #[serde(alias = "mean_absolute_error")]
    Mae,
    CrossEntropy,
}

impl LossType {
    pub fn loss(&self, predicted: &Matrix, expected: &Matrix) -> Result<f64> {
        match self {
            LossType::Mse => MseLoss::loss(predicted, expected),
            LossType::Mae => MaeLoss::loss(predicted, expected),
            LossType::CrossEntropy => CrossEntropyLoss::loss(predicted, expected),
        }
    }

    pub fn derivative(&self, predicted: &Matrix, expected: &Matrix) -> Result<Matrix> {
        match self {
            LossType::Mse => MseLoss::derivative(predicted, expected),
            LossType::Mae => MaeLoss::derivative(predicted, expected),
            LossType::CrossEntropy => CrossEntropyLoss::derivative(predicted, expected),
        }
    }
}

impl FromStr for LossType {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "mse" | "mean_squared_error" => Ok(LossType::Mse),
            "mae" | "mean_absolute_error" => Ok(LossType::Mae),
            "cross_entropy" => Ok(LossType::CrossEntropy),
            other => Err(Error::invalid(format!("unknown loss function '{other}'"))),
        }
    }
}
