use crate::error::{Error, Result};
use crate::layers::layer::{Layer, LayerCache};
use crate::loss::loss_type::LossType;
use crate::math::matrix::Matrix;

/// Ordered stack of layers trained against one loss function.
///
/// The output of layer `i` is the only input of layer `i + 1`; backward runs
/// the same stack in reverse.
pub struct Network {
    layers: Vec<Box<dyn Layer>>,
    loss: LossType,
}

impl Network {
    pub fn new(loss: LossType) -> Network {
        Network {
            layers: Vec::new(),
            loss,
        }
    }

    /// Appends a layer. Its input size must match the previous layer's output size.
    pub fn add_layer<L: Layer + 'static>(&mut self, layer: L) -> Result<()> {
        if let Some(last) = self.layers.last() {
            if last.output_size() != layer.input_size() {
                return Err(Error::invalid(format!(
                    "layer {} expects {} inputs but the previous layer produces {}",
                    self.layers.len(),
                    layer.input_size(),
                    last.output_size()
                )));
            }
        }
        self.layers.push(Box::new(layer));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn loss_type(&self) -> LossType {
        self.loss
    }

    /// Forward pass through every layer; returns the last layer's output.
    pub fn predict(&self, features: &Matrix) -> Result<Matrix> {
        let mut current = features.clone();
        for layer in &self.layers {
            let (output, _) = layer.forward(&current)?;
            current = output;
        }
        Ok(current)
    }

    /// Forward pass that also returns each layer's cache, in stack order.
    pub fn forward_with_caches(&self, features: &Matrix) -> Result<(Matrix, Vec<LayerCache>)> {
        let mut caches = Vec::with_capacity(self.layers.len());
        let mut current = features.clone();
        for layer in &self.layers {
            let (output, cache) = layer.forward(&current)?;
            caches.push(cache);
            current = output;
        }
        Ok((current, caches))
    }

    /// Pushes `grad` (∂L/∂predictions) back through the stack, updating every
    /// layer. `caches` must come from the `forward_with_caches` call that
    /// produced those predictions. Returns ∂L/∂features.
    pub fn backward(&mut self, caches: Vec<LayerCache>, grad: Matrix) -> Result<Matrix> {
        if caches.len() != self.layers.len() {
            return Err(Error::invalid(format!(
                "{} layer caches supplied for {} layers",
                caches.len(),
                self.layers.len()
            )));
        }
        let mut grad = grad;
        for (layer, cache) in self.layers.iter_mut().rev().zip(caches.into_iter().rev()) {
            grad = layer.backward(cache, &grad)?;
        }
        Ok(grad)
    }

    pub fn calculate_loss(&self, predictions: &Matrix, targets: &Matrix) -> Result<f64> {
        self.loss.loss(predictions, targets)
    }

    pub fn calculate_loss_derivative(&self, predictions: &Matrix, targets: &Matrix) -> Result<Matrix> {
        self.loss.derivative(predictions, targets)
    }

    /// Fraction of rows whose predicted argmax equals the column holding the
    /// target's `1` (targets are one-hot).
    pub fn calc_accuracy(&self, predictions: &Matrix, targets: &Matrix) -> Result<f64> {
        if predictions.shape() != targets.shape() {
            return Err(Error::ShapeMismatch {
                op: "accuracy",
                left: predictions.shape(),
                right: targets.shape(),
            });
        }
        let n = predictions.rows();
        if n == 0 {
            return Ok(0.0);
        }
        let mut correct = 0usize;
        for i in 0..n {
            let target_class = targets
                .row(i)?
                .iter()
                .rposition(|&t| t == 1.0)
                .unwrap_or(0);
            if predictions.argmax_row(i)? == target_class {
                correct += 1;
            }
        }
        Ok(correct as f64 / n as f64)
    }
}
