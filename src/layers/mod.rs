pub mod layer;
pub mod dense;

pub use layer::{Layer, LayerCache};
pub use dense::DenseLayer;
