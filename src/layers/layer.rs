use crate::error::Result;
use crate::math::matrix::Matrix;

/// State a layer's forward pass hands to its matching backward pass.
///
/// Returned by value from [`Layer::forward`] and consumed by
/// [`Layer::backward`], so each forward result feeds exactly one backward.
#[derive(Debug, Clone)]
pub struct LayerCache {
    /// Batch that entered the layer, shape `(batch, input_size)`.
    pub input: Matrix,
    /// Affine output before the activation, shape `(batch, output_size)`.
    pub pre_activation: Matrix,
}

/// A trainable stage in a [`Network`](crate::network::Network).
pub trait Layer: Send {
    /// Maps `(batch, input_size)` to `(batch, output_size)`.
    fn forward(&self, input: &Matrix) -> Result<(Matrix, LayerCache)>;

    /// Takes ∂L/∂output, updates the layer's parameters in place and returns ∂L/∂input.
    fn backward(&mut self, cache: LayerCache, grad: &Matrix) -> Result<Matrix>;

    fn input_size(&self) -> usize;

    fn output_size(&self) -> usize;
}
