use std::time::Instant;

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::train::early_stopping::EarlyStopping;
use crate::train::epoch_stats::{EpochStats, TrainSummary};
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` with mini-batch gradient descent for at most
/// `config.epochs` epochs.
///
/// # Arguments
/// - `network`      — modified in place; every batch updates every layer
/// - `features`     — training rows, shape `(n, input_size)`
/// - `targets`      — training targets, shape `(n, output_size)`
/// - `val_features` — validation rows, evaluated after every epoch
/// - `val_targets`  — validation targets
/// - `config`       — hyper-parameters and optional progress channel
///
/// Batches are contiguous row ranges taken in order; the last one holds the
/// remainder. After each epoch the validation loss feeds an
/// [`EarlyStopping`] counter, and training ends as soon as it runs out of
/// patience.
///
/// # Errors
/// `InvalidArgument` if the training or validation set is empty, row counts
/// of features and targets differ, or `batch_size == 0`. Any error raised by
/// a forward/backward step aborts the whole run.
pub fn train_loop(
    network: &mut Network,
    features: &Matrix,
    targets: &Matrix,
    val_features: &Matrix,
    val_targets: &Matrix,
    config: &TrainConfig,
) -> Result<TrainSummary> {
    check_dataset("training", features, targets)?;
    check_dataset("validation", val_features, val_targets)?;
    if config.batch_size == 0 {
        return Err(Error::invalid("batch_size must be at least 1"));
    }

    let mut stopper = EarlyStopping::new(config.patience);
    let mut history = Vec::with_capacity(config.epochs);
    let mut stopped_early = false;

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        // ── One full pass over the training data ───────────────────────────
        let train_loss = run_one_epoch(network, features, targets, config.batch_size)?;

        // ── Validation ────────────────────────────────────────────────────
        let val_predictions = network.predict(val_features)?;
        let val_loss = network.calculate_loss(&val_predictions, val_targets)?;
        let val_accuracy = network.calc_accuracy(&val_predictions, val_targets)?;

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            val_loss,
            val_accuracy,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        // ── Emit progress ─────────────────────────────────────────────────
        if let Some(ref tx) = config.progress_tx {
            // A dropped receiver just means nobody is listening any more.
            let _ = tx.send(stats.clone());
        }
        history.push(stats);

        if stopper.observe(val_loss) {
            stopped_early = true;
            break;
        }
    }

    Ok(TrainSummary {
        epochs_run: history.len(),
        best_val_loss: stopper.best(),
        stopped_early,
        history,
    })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn check_dataset(name: &str, features: &Matrix, targets: &Matrix) -> Result<()> {
    if features.rows() == 0 {
        return Err(Error::invalid(format!("{name} set must not be empty")));
    }
    if features.rows() != targets.rows() {
        return Err(Error::invalid(format!(
            "{name} set has {} feature rows but {} target rows",
            features.rows(),
            targets.rows()
        )));
    }
    Ok(())
}

/// Runs one epoch of mini-batch gradient descent.
/// Returns the mean of the per-batch losses.
fn run_one_epoch(
    network: &mut Network,
    features: &Matrix,
    targets: &Matrix,
    batch_size: usize,
) -> Result<f64> {
    let n = features.rows();
    let mut total_loss = 0.0;
    let mut n_batches = 0usize;

    for batch_start in (0..n).step_by(batch_size) {
        let batch_end = (batch_start + batch_size).min(n);
        let batch_features = features.slice_rows(batch_start, batch_end)?;
        let batch_targets = targets.slice_rows(batch_start, batch_end)?;

        let (predictions, caches) = network.forward_with_caches(&batch_features)?;
        let grad = network.calculate_loss_derivative(&predictions, &batch_targets)?;
        network.backward(caches, grad)?;

        // Loss of the predictions that produced this step's gradient.
        total_loss += network.calculate_loss(&predictions, &batch_targets)?;
        n_batches += 1;
    }

    Ok(total_loss / n_batches as f64)
}
