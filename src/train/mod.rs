pub mod trainer;
pub mod epoch_stats;
pub mod early_stopping;
pub mod train_config;
pub mod loop_fn;

pub use epoch_stats::{EpochStats, TrainSummary};
pub use early_stopping::EarlyStopping;
pub use train_config::TrainConfig;
pub use loop_fn::train_loop;
