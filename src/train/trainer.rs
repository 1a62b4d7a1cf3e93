use crate::error::Result;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::train::epoch_stats::TrainSummary;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

impl Network {
    /// Trains with early stopping on `val_features`/`val_targets`.
    ///
    /// Shorthand for [`train_loop`] with a [`TrainConfig`] that has no
    /// progress channel.
    #[allow(clippy::too_many_arguments)]
    pub fn train(
        &mut self,
        features: &Matrix,
        targets: &Matrix,
        val_features: &Matrix,
        val_targets: &Matrix,
        epochs: usize,
        batch_size: usize,
        patience: usize,
    ) -> Result<TrainSummary> {
        let config = TrainConfig::new(epochs, batch_size, patience);
        train_loop(self, features, targets, val_features, val_targets, &config)
    }
}
