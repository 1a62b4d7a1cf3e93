use rand::Rng;

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::init::weight_init::WeightInit;
use crate::layers::layer::{Layer, LayerCache};
use crate::math::matrix::Matrix;
use crate::optim::sgd::Sgd;

/// Fully connected layer: `activation(input × weights + bias)`.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    weights: Matrix, // (in_dim, out_dim)
    bias: Matrix,    // (1, out_dim)
    activation: ActivationFunction,
    optimizer: Sgd,
}

impl DenseLayer {
    /// Builds a layer with weights from `init` and a zero bias.
    pub fn new<R: Rng + ?Sized>(
        in_dim: usize,
        out_dim: usize,
        activation: ActivationFunction,
        init: WeightInit,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<DenseLayer> {
        let weights = init.initialize(in_dim, out_dim, rng)?;
        DenseLayer::from_parameters(weights, Matrix::zeros(1, out_dim), activation, learning_rate)
    }

    /// Builds a layer around explicit parameters; `bias` must be `1 x weights.cols()`.
    pub fn from_parameters(
        weights: Matrix,
        bias: Matrix,
        activation: ActivationFunction,
        learning_rate: f64,
    ) -> Result<DenseLayer> {
        if bias.rows() != 1 || bias.cols() != weights.cols() {
            return Err(Error::ShapeMismatch {
                op: "dense_bias",
                left: weights.shape(),
                right: bias.shape(),
            });
        }
        if !learning_rate.is_finite() || learning_rate < 0.0 {
            return Err(Error::invalid(format!(
                "learning rate must be finite and non-negative, got {learning_rate}"
            )));
        }
        Ok(DenseLayer {
            weights,
            bias,
            activation,
            optimizer: Sgd::new(learning_rate),
        })
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn bias(&self) -> &Matrix {
        &self.bias
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate
    }
}

impl Layer for DenseLayer {
    fn forward(&self, input: &Matrix) -> Result<(Matrix, LayerCache)> {
        // z = x·W + b, with b broadcast over the batch rows
        let pre_activation = input.matmul(&self.weights)?.add_row(&self.bias)?;
        let output = self.activation.apply(&pre_activation);
        let cache = LayerCache {
            input: input.clone(),
            pre_activation,
        };
        Ok((output, cache))
    }

    fn backward(&mut self, cache: LayerCache, grad: &Matrix) -> Result<Matrix> {
        // δ = ∂L/∂a ⊙ σ'(z)
        let act_derivative = self.activation.derivative(&cache.pre_activation);
        let delta = grad.hadamard(&act_derivative)?;

        // Input gradient uses the weights as they were before this step.
        let input_grad = delta.matmul(&self.weights.transpose())?;
        let weights_grad = cache.input.transpose().matmul(&delta)?;
        let bias_grad = delta.sum_rows();

        self.optimizer.step(&mut self.weights, &weights_grad)?;
        self.optimizer.step(&mut self.bias, &bias_grad)?;

        Ok(input_grad)
    }

    fn input_size(&self) -> usize {
        self.weights.rows()
    }

    fn output_size(&self) -> usize {
        self.weights.cols()
    }
}
