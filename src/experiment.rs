use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::data::frontier::{generate_frontier_dataset, DatasetConfig, FRONTIER_CLASSES};
use crate::error::{Result, SubstrateError};
use crate::metrics::substrate::SubstrateMetrics;
use crate::network::network::SubstrateNetwork;
use crate::network::spec::NetworkSpec;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

/// Full description of one run: dataset, architecture and training schedule.
/// Every section may be omitted from JSON; the defaults train a
/// 10 → [25, 20] → 3 network for 100 epochs on 2000 frontier samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub network: NetworkSpec,
    #[serde(default)]
    pub train: TrainConfig,
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<()> {
        self.network.validate()?;
        self.train.validate()?;
        if self.network.input_dim != self.dataset.n_features {
            return Err(SubstrateError::InvalidConfig(format!(
                "network input_dim {} does not match dataset n_features {}",
                self.network.input_dim, self.dataset.n_features
            )));
        }
        if self.network.output_dim != FRONTIER_CLASSES {
            return Err(SubstrateError::InvalidConfig(format!(
                "network output_dim must be {FRONTIER_CLASSES}, got {}",
                self.network.output_dim
            )));
        }
        if self.dataset.n_samples == 0 {
            return Err(SubstrateError::InvalidConfig("n_samples must be positive".into()));
        }
        if self.dataset.n_features < crate::data::frontier::MIN_FRONTIER_FEATURES {
            return Err(SubstrateError::InvalidConfig(format!(
                "frontier dataset needs at least {} features",
                crate::data::frontier::MIN_FRONTIER_FEATURES
            )));
        }
        Ok(())
    }

    /// Deserializes and validates an `ExperimentConfig` from a JSON file.
    pub fn load_json(path: &str) -> Result<ExperimentConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: ExperimentConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

/// Outcome of `run_experiment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub final_accuracy: f64,
    pub accuracy_history: Vec<f64>,
    pub substrate_activity: Vec<f64>,
    pub substrate_metrics: SubstrateMetrics,
    pub boosts: usize,
}

/// Generates the dataset, builds the network from `config.network.seed`
/// and trains it. The generator that initialized the weights goes on to
/// drive the plateau noise.
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentReport> {
    config.validate()?;

    let (inputs, targets) = generate_frontier_dataset(&config.dataset);
    info!(
        samples = inputs.rows,
        features = inputs.cols,
        hidden = ?config.network.hidden_dims,
        epochs = config.train.epochs,
        "starting substrate experiment"
    );

    let mut rng = StdRng::seed_from_u64(config.network.seed);
    let mut network = SubstrateNetwork::new(&config.network, &mut rng);
    let report = train_loop(&mut network, &inputs, &targets, &config.train, &mut rng);

    Ok(ExperimentReport {
        final_accuracy: report.final_accuracy().unwrap_or(0.0),
        accuracy_history: report.accuracies,
        substrate_activity: report.scar_activity_log,
        substrate_metrics: network.metrics(),
        boosts: report.boosts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ExperimentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_mismatched_dimensions_are_rejected() {
        let mut config = ExperimentConfig::default();
        config.network.input_dim = 12;
        assert!(matches!(config.validate(), Err(SubstrateError::InvalidConfig(_))));

        let mut config = ExperimentConfig::default();
        config.network.output_dim = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sections_default_independently() {
        let config: ExperimentConfig =
            serde_json::from_str(r#"{ "train": { "epochs": 5 } }"#).unwrap();
        assert_eq!(config.train.epochs, 5);
        assert_eq!(config.network, NetworkSpec::default());
        assert_eq!(config.dataset, DatasetConfig::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ExperimentConfig::load_json("/nonexistent/substrate.json").unwrap_err();
        assert!(matches!(err, SubstrateError::Io(_)));
    }

    #[test]
    fn test_small_run_is_reproducible() {
        let mut config = ExperimentConfig::default();
        config.dataset.n_samples = 120;
        config.network.hidden_dims = vec![6, 5];
        config.train.epochs = 20;
        let a = run_experiment(&config).unwrap();
        let b = run_experiment(&config).unwrap();
        assert_eq!(a.accuracy_history.len(), 20);
        assert_eq!(a.substrate_metrics.scar_memory_length, 20);
        assert_eq!(a.accuracy_history, b.accuracy_history);
    }
}
