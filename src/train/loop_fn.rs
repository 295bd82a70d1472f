use rand::Rng;
use serde::{Serialize, Deserialize};
use tracing::{debug, info};

use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::math::matrix::Matrix;
use crate::network::network::SubstrateNetwork;
use crate::train::epoch_stats::EpochStats;
use crate::train::plateau::PlateauMonitor;
use crate::train::train_config::TrainConfig;

/// Everything a training run produces besides the trained parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// One accuracy per epoch, measured on the forward pass of that epoch.
    pub accuracies: Vec<f64>,
    /// Rolling mean of the last ten scar values, appended at every epoch
    /// whose forward pass saw a non-empty scar memory.
    pub scar_activity_log: Vec<f64>,
    pub epochs: Vec<EpochStats>,
    /// Number of plateau perturbations applied.
    pub boosts: usize,
}

impl TrainingReport {
    pub fn final_accuracy(&self) -> Option<f64> {
        self.accuracies.last().copied()
    }
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` full-batch for exactly `config.epochs` epochs.
///
/// Each epoch: forward pass, accuracy bookkeeping, backward pass with the
/// adaptive rate, then the plateau check. `rng` supplies the plateau noise.
///
/// # Panics
/// Panics if `inputs` is empty or its row count differs from `targets`.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut SubstrateNetwork,
    inputs: &Matrix,
    targets: &Matrix,
    config: &TrainConfig,
    rng: &mut R,
) -> TrainingReport {
    assert!(inputs.rows > 0, "inputs must not be empty");
    assert_eq!(
        inputs.rows,
        targets.rows,
        "inputs and targets must have equal row counts"
    );

    let monitor = PlateauMonitor::from_config(config);
    let mut accuracies = Vec::with_capacity(config.epochs);
    let mut scar_activity_log = Vec::with_capacity(config.epochs);
    let mut epochs = Vec::with_capacity(config.epochs);
    let mut boosts = 0;

    for epoch in 0..config.epochs {
        let predictions = network.forward(inputs);

        let accuracy = compute_accuracy(&predictions, targets);
        let loss = CrossEntropyLoss::batch_loss(&predictions, targets);
        accuracies.push(accuracy);

        if let Some(recent) = network.scar_memory().recent_mean() {
            scar_activity_log.push(recent);
        }

        network.backward(inputs, targets, epoch);

        let boosted = monitor.check(epoch, &accuracies, network, rng);
        if boosted {
            boosts += 1;
        }

        let (scar_activity, learning_rate) = network.last_step()
            .map_or((0.0, 0.0), |step| (step.scar_activity, step.learning_rate));

        debug!(epoch, accuracy, loss, scar_activity, learning_rate, boosted, "epoch complete");

        epochs.push(EpochStats {
            epoch,
            accuracy,
            loss,
            scar_activity,
            learning_rate,
            boosted,
        });
    }

    let report = TrainingReport {
        accuracies,
        scar_activity_log,
        epochs,
        boosts,
    };
    info!(
        epochs = config.epochs,
        final_accuracy = report.final_accuracy().unwrap_or(0.0),
        boosts,
        "training finished"
    );
    report
}

/// Fraction of rows whose argmax prediction matches the one-hot target.
pub fn compute_accuracy(predictions: &Matrix, targets: &Matrix) -> f64 {
    if predictions.rows != targets.rows {
        panic!("Predictions and targets are of incorrect sizes")
    }
    if predictions.rows == 0 {
        return 0.0;
    }
    let correct = predictions.argmax_rows().into_iter()
        .zip(targets.argmax_rows())
        .filter(|(p, t)| p == t)
        .count();
    correct as f64 / predictions.rows as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::spec::NetworkSpec;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn separable_batch() -> (Matrix, Matrix) {
        let mut rng = StdRng::seed_from_u64(3);
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..60 {
            let class = i % 2;
            let centre = if class == 0 { -1.0 } else { 1.0 };
            x.push(vec![
                centre + 0.2 * (rng.gen::<f64>() - 0.5),
                -centre + 0.2 * (rng.gen::<f64>() - 0.5),
            ]);
            y.push(if class == 0 { vec![1.0, 0.0] } else { vec![0.0, 1.0] });
        }
        (Matrix::from_data(x), Matrix::from_data(y))
    }

    #[test]
    fn test_accuracy_counts_argmax_matches() {
        let p = Matrix::from_data(vec![vec![0.7, 0.3], vec![0.4, 0.6], vec![0.9, 0.1]]);
        let y = Matrix::from_data(vec![vec![1.0, 0.0], vec![1.0, 0.0], vec![1.0, 0.0]]);
        assert!((compute_accuracy(&p, &y) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_predictions_score_first_class() {
        let p = Matrix::from_data(vec![vec![1.0 / 3.0; 3]; 4]);
        let first = Matrix::from_data(vec![vec![1.0, 0.0, 0.0]; 4]);
        let last = Matrix::from_data(vec![vec![0.0, 0.0, 1.0]; 4]);
        assert_eq!(compute_accuracy(&p, &first), 1.0);
        assert_eq!(compute_accuracy(&p, &last), 0.0);
    }

    #[test]
    fn test_report_lengths() {
        let (x, y) = separable_batch();
        let mut rng = StdRng::seed_from_u64(42);
        let mut net = SubstrateNetwork::new(&NetworkSpec::new(2, vec![4], 2), &mut rng);
        let report = train_loop(&mut net, &x, &y, &TrainConfig::new(20, 0.001), &mut rng);
        assert_eq!(report.accuracies.len(), 20);
        assert_eq!(report.epochs.len(), 20);
        // The first epoch runs before any scar value exists.
        assert_eq!(report.scar_activity_log.len(), 19);
        assert_eq!(net.scar_memory().len(), 20);
        assert!(report.accuracies.iter().all(|a| (0.0..=1.0).contains(a)));
    }

    #[test]
    fn test_log_is_rolling_mean_of_memory() {
        let (x, y) = separable_batch();
        let mut rng = StdRng::seed_from_u64(42);
        let mut net = SubstrateNetwork::new(&NetworkSpec::new(2, vec![3, 3], 2), &mut rng);
        let report = train_loop(&mut net, &x, &y, &TrainConfig::new(14, 0.001), &mut rng);
        let memory = net.scar_memory().values();
        // Entry k was logged before step k + 1, so it covers memory[..k + 1].
        for (k, logged) in report.scar_activity_log.iter().enumerate() {
            let start = (k + 1).saturating_sub(10);
            let window = &memory[start..k + 1];
            let expected = window.iter().sum::<f64>() / window.len() as f64;
            assert!((logged - expected).abs() < 1e-12, "entry {k}");
        }
        for (stats, &value) in report.epochs.iter().zip(memory.iter()) {
            assert_eq!(stats.scar_activity, value);
        }
    }

    #[test]
    fn test_learns_separable_data() {
        let (x, y) = separable_batch();
        let mut rng = StdRng::seed_from_u64(42);
        let mut net = SubstrateNetwork::new(&NetworkSpec::new(2, vec![], 2), &mut rng);
        let report = train_loop(&mut net, &x, &y, &TrainConfig::new(200, 0.001), &mut rng);
        assert!(report.final_accuracy().unwrap() > 0.95);
    }

    #[test]
    fn test_boost_counted_in_stats() {
        let (x, y) = separable_batch();
        let mut rng = StdRng::seed_from_u64(42);
        let mut net = SubstrateNetwork::new(&NetworkSpec::new(2, vec![], 2), &mut rng);
        // An unreachable threshold makes every check point fire.
        let config = TrainConfig::new(46, 2.0);
        let report = train_loop(&mut net, &x, &y, &config, &mut rng);
        let boosted: Vec<usize> = report.epochs.iter()
            .filter(|s| s.boosted)
            .map(|s| s.epoch)
            .collect();
        assert_eq!(boosted, vec![15, 30, 45]);
        assert_eq!(report.boosts, 3);
    }
}
