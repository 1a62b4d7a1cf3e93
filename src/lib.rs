pub mod error;
pub mod math;
pub mod activation;
pub mod init;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod data;

// Convenience re-exports
pub use error::{Error, Result, Shape};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use init::weight_init::WeightInit;
pub use layers::{DenseLayer, Layer, LayerCache};
pub use network::{Network, NetworkSpec, LayerSpec, TrainingSpec};
pub use loss::{LossType, MseLoss, MaeLoss, CrossEntropyLoss};
pub use optim::sgd::Sgd;
pub use train::{train_loop, EarlyStopping, EpochStats, TrainConfig, TrainSummary};
