use std::sync::mpsc;

use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`      — maximum number of full passes over the training data
/// - `batch_size`  — rows per mini-batch; the last batch holds the remainder
/// - `patience`    — consecutive epochs without validation improvement before
///                   training stops
/// - `progress_tx` — optional channel sender; one `EpochStats` is sent per
///                   completed epoch. A dropped receiver only silences the
///                   reports, training carries on.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub patience: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no progress channel.
    pub fn new(epochs: usize, batch_size: usize, patience: usize) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            patience,
            progress_tx: None,
        }
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }
}
