use serde::{Deserialize, Serialize};

/// Per-epoch training statistics emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `EpochStats` value at the end of every completed epoch.
/// The same records are collected into [`TrainSummary::history`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean of the batch losses in this epoch.
    pub train_loss: f64,
    /// Loss on the validation set after this epoch's updates.
    pub val_loss: f64,
    /// Validation accuracy as a fraction in [0, 1].
    pub val_accuracy: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

/// Outcome of a complete `train_loop` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainSummary {
    /// Epochs actually run; less than requested when early stopping fired.
    pub epochs_run: usize,
    pub best_val_loss: f64,
    pub stopped_early: bool,
    pub history: Vec<EpochStats>,
}
