use rand::Rng;
use tracing::info;

use crate::network::network::SubstrateNetwork;
use crate::train::train_config::TrainConfig;

/// Detects stalled accuracy and perturbs the weights to escape it.
///
/// Every `window`-th epoch, once `window + 1` accuracy samples exist, the
/// latest accuracy is compared with the one `window` epochs earlier. A gain
/// below `threshold` triggers N(0, noise_scale²) noise on every weight
/// matrix. Biases are never touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateauMonitor {
    pub window: usize,
    pub threshold: f64,
    pub noise_scale: f64,
}

impl PlateauMonitor {
    pub fn new(window: usize, threshold: f64, noise_scale: f64) -> Self {
        PlateauMonitor { window, threshold, noise_scale }
    }

    pub fn from_config(config: &TrainConfig) -> Self {
        PlateauMonitor::new(config.plateau_window, config.plateau_threshold, config.noise_scale)
    }

    /// Accuracy gain over the last window, if this epoch is a check point.
    pub fn improvement(&self, epoch: usize, accuracy_history: &[f64]) -> Option<f64> {
        if self.window == 0 || epoch % self.window != 0 || accuracy_history.len() <= self.window {
            return None;
        }
        let n = accuracy_history.len();
        Some(accuracy_history[n - 1] - accuracy_history[n - 1 - self.window])
    }

    pub fn should_boost(&self, epoch: usize, accuracy_history: &[f64]) -> bool {
        self.improvement(epoch, accuracy_history)
            .map_or(false, |gain| gain < self.threshold)
    }

    /// Runs the check for `epoch` and perturbs `network` when it fires.
    /// Returns whether noise was injected.
    pub fn check<R: Rng + ?Sized>(
        &self,
        epoch: usize,
        accuracy_history: &[f64],
        network: &mut SubstrateNetwork,
        rng: &mut R,
    ) -> bool {
        let Some(gain) = self.improvement(epoch, accuracy_history) else {
            return false;
        };
        if gain >= self.threshold {
            return false;
        }
        info!(epoch, gain, threshold = self.threshold, "accuracy plateau, perturbing weights");
        network.substrate_boost(self.noise_scale, rng);
        true
    }
}

impl Default for PlateauMonitor {
    fn default() -> Self {
        PlateauMonitor::from_config(&TrainConfig::default())
    }
}
