use serde::{Serialize, Deserialize};

use crate::error::{Result, SubstrateError};

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`           : full-batch steps to run; training never stops early
/// - `plateau_threshold`: minimum accuracy gain over one plateau window
///                         below which the weights are perturbed
/// - `plateau_window`   : epochs between plateau checks, and the lag the
///                         gain is measured over
/// - `noise_scale`      : standard deviation of the perturbation noise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    #[serde(default = "default_plateau_threshold")]
    pub plateau_threshold: f64,
    #[serde(default = "default_plateau_window")]
    pub plateau_window: usize,
    #[serde(default = "default_noise_scale")]
    pub noise_scale: f64,
}

fn default_epochs() -> usize { 100 }
fn default_plateau_threshold() -> f64 { 0.001 }
fn default_plateau_window() -> usize { 15 }
fn default_noise_scale() -> f64 { 0.001 }

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: default_epochs(),
            plateau_threshold: default_plateau_threshold(),
            plateau_window: default_plateau_window(),
            noise_scale: default_noise_scale(),
        }
    }
}

impl TrainConfig {
    /// Default configuration with the given epoch count and plateau threshold.
    pub fn new(epochs: usize, plateau_threshold: f64) -> Self {
        TrainConfig {
            epochs,
            plateau_threshold,
            ..TrainConfig::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(SubstrateError::InvalidConfig("epochs must be positive".into()));
        }
        if self.plateau_window == 0 {
            return Err(SubstrateError::InvalidConfig("plateau_window must be positive".into()));
        }
        if !(self.noise_scale.is_finite() && self.noise_scale >= 0.0) {
            return Err(SubstrateError::InvalidConfig(format!(
                "noise_scale must be a finite non-negative number, got {}",
                self.noise_scale
            )));
        }
        Ok(())
    }
}
