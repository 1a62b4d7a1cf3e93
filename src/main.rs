//! MNIST digit classification driver.
//!
//! Usage:
//!   ferrite-mlp [DATA_DIR] [SPEC_JSON]
//!
//! `DATA_DIR` (default `./mnist_data`) must hold the four IDX files. Without
//! `SPEC_JSON` the network is 784 → 128 (ReLU) → 10 (Softmax) trained with
//! cross-entropy. The last 10% of the training rows are held out for
//! validation and early stopping.

use std::path::Path;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use ferrite_mlp::data::idx;
use ferrite_mlp::{
    train_loop, ActivationFunction, EpochStats, LayerSpec, LossType, NetworkSpec, Result,
    TrainingSpec, WeightInit,
};

const N_CLASSES: usize = 10;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn default_spec() -> NetworkSpec {
    let learning_rate = 0.01;
    NetworkSpec {
        name: "mnist-mlp".to_owned(),
        loss: LossType::CrossEntropy,
        layers: vec![
            LayerSpec {
                in_dim: 784,
                out_dim: 128,
                activation: ActivationFunction::Relu,
                weight_init: WeightInit::HeUniform,
                learning_rate,
            },
            LayerSpec {
                in_dim: 128,
                out_dim: N_CLASSES,
                activation: ActivationFunction::Softmax,
                weight_init: WeightInit::random_uniform(),
                learning_rate,
            },
        ],
        seed: Some(84),
        training: TrainingSpec {
            epochs: 20,
            batch_size: 64,
            patience: 5,
        },
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let data_dir = args.next().unwrap_or_else(|| "./mnist_data".to_owned());
    let spec = match args.next() {
        Some(path) => NetworkSpec::load_json(&path)?,
        None => default_spec(),
    };
    let dir = Path::new(&data_dir);

    let images = idx::load_images(dir.join("train-images.idx3-ubyte"))? / 255.0;
    let labels = idx::load_labels(dir.join("train-labels.idx1-ubyte"), N_CLASSES)?;
    println!("Training set shape: {}", images.shape());

    let test_images = idx::load_images(dir.join("t10k-images.idx3-ubyte"))? / 255.0;
    let test_labels = idx::load_labels(dir.join("t10k-labels.idx1-ubyte"), N_CLASSES)?;
    println!("Test set shape: {}", test_images.shape());

    let split = images.rows() - images.rows() / 10;
    let train_x = images.slice_rows(0, split)?;
    let train_y = labels.slice_rows(0, split)?;
    let val_x = images.slice_rows(split, images.rows())?;
    let val_y = labels.slice_rows(split, labels.rows())?;

    let mut network = spec.build()?;
    println!("Built '{}' with {} layers", spec.name, network.len());

    let (tx, rx) = mpsc::channel::<EpochStats>();
    let printer = thread::spawn(move || {
        for stats in rx {
            println!(
                "Epoch {}/{} - loss: {:.6} - val_loss: {:.6} - val_accuracy: {:.4} ({} ms)",
                stats.epoch,
                stats.total_epochs,
                stats.train_loss,
                stats.val_loss,
                stats.val_accuracy,
                stats.elapsed_ms
            );
        }
    });

    let config = spec.training.to_config().with_progress(tx);
    let result = train_loop(&mut network, &train_x, &train_y, &val_x, &val_y, &config);
    // Closing the channel lets the printer drain and exit.
    drop(config);
    if !join_printer(printer) {
        eprintln!("warning: progress printer thread panicked; some epoch lines may be missing");
    }
    let summary = result?;

    if summary.stopped_early {
        println!(
            "Early stopping after {} epochs (best val_loss {:.6})",
            summary.epochs_run, summary.best_val_loss
        );
    }

    let test_pred = network.predict(&test_images)?;
    println!(
        "Test Accuracy: {:.4}",
        network.calc_accuracy(&test_pred, &test_labels)?
    );
    Ok(())
}

/// Waits for the progress printer. Returns `false` if it panicked.
fn join_printer(printer: JoinHandle<()>) -> bool {
    printer.join().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printer_panic_is_reported_not_swallowed() {
        let healthy = thread::spawn(|| {});
        assert!(join_printer(healthy));
        let broken = thread::spawn(|| panic!("printer failed"));
        assert!(!join_printer(broken));
    }

    #[test]
    fn default_spec_builds_a_mnist_sized_network() {
        let network = default_spec().build().unwrap();
        assert_eq!(network.len(), 2);
    }
}
