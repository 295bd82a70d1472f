pub mod math;
pub mod activation;
pub mod scar;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod metrics;
pub mod train;
pub mod data;
pub mod experiment;
pub mod error;
pub mod telemetry;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use scar::operator::scar_operator;
pub use layers::dense::Layer;
pub use network::{SubstrateNetwork, NetworkSpec, ActivationCache};
pub use optim::schedule::adaptive_learning_rate;
pub use metrics::substrate::{ScarMemory, SubstrateMetrics};
pub use train::{train_loop, TrainConfig, TrainingReport, PlateauMonitor};
pub use data::frontier::{generate_frontier_dataset, DatasetConfig};
pub use experiment::{run_experiment, ExperimentConfig, ExperimentReport};
pub use error::{SubstrateError, Result};
