/// Validation-loss patience counter.
///
/// Only a strict improvement on the best loss seen so far resets the counter;
/// equal or worse losses (and NaN) count as an epoch without improvement.
#[derive(Debug, Clone)]
pub struct EarlyStopping {
    patience: usize,
    best: f64,
    stale_epochs: usize,
}

impl EarlyStopping {
    pub fn new(patience: usize) -> EarlyStopping {
        EarlyStopping {
            patience,
            best: f64::INFINITY,
            stale_epochs: 0,
        }
    }

    /// Records one epoch's validation loss. Returns `true` once training should stop.
    pub fn observe(&mut self, val_loss: f64) -> bool {
        if val_loss < self.best {
            self.best = val_loss;
            self.stale_epochs = 0;
            false
        } else {
            self.stale_epochs += 1;
            self.stale_epochs >= self.patience
        }
    }

    pub fn best(&self) -> f64 {
        self.best
    }
}
