use crate::error::Result;
use crate::math::matrix::Matrix;

/// Plain gradient descent. Each dense layer owns one, carrying its learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update in place: `param -= learning_rate * grad`.
    pub fn step(&self, param: &mut Matrix, grad: &Matrix) -> Result<()> {
        param.scaled_sub_assign(grad, self.learning_rate)
    }
}
