pub mod epoch_stats;
pub mod train_config;
pub mod plateau;
pub mod loop_fn;

pub use epoch_stats::EpochStats;
pub use train_config::TrainConfig;
pub use plateau::PlateauMonitor;
pub use loop_fn::{train_loop, compute_accuracy, TrainingReport};
