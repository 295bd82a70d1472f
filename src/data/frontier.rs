use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// Number of classes the frontier labelling rule produces.
pub const FRONTIER_CLASSES: usize = 3;

/// Smallest feature count the labelling rule can address.
pub const MIN_FRONTIER_FEATURES: usize = 6;

/// Parameters of the synthetic frontier dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_samples")]
    pub n_samples: usize,
    #[serde(default = "default_features")]
    pub n_features: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_samples() -> usize { 2000 }
fn default_features() -> usize { 10 }
fn default_seed() -> u64 { 123 }

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            n_samples: default_samples(),
            n_features: default_features(),
            seed: default_seed(),
        }
    }
}

/// Class of one feature row under the frontier rule:
///
/// - `c1`: product of the first five features is positive
/// - `c2`: sum of the remaining features is negative
/// - `c3`: first and last feature have opposite signs
///
/// Class 0 when `c1 && c2`, class 1 when `!c1 && c3`, class 2 otherwise.
pub fn frontier_class(features: &[f64]) -> usize {
    if features.len() < MIN_FRONTIER_FEATURES {
        panic!(
            "frontier rule needs at least {} features, got {}",
            MIN_FRONTIER_FEATURES,
            features.len()
        )
    }
    let c1 = features[..5].iter().product::<f64>() > 0.0;
    let c2 = features[5..].iter().sum::<f64>() < 0.0;
    let c3 = features[0] * features[features.len() - 1] < 0.0;

    if c1 && c2 {
        0
    } else if !c1 && c3 {
        1
    } else {
        2
    }
}

/// Features drawn uniformly from [-2, 2) with one-hot targets assigned by
/// `frontier_class`. Returns `(X, Y)` with shapes (n_samples, n_features)
/// and (n_samples, 3). Deterministic for a given seed.
pub fn generate_frontier_dataset(config: &DatasetConfig) -> (Matrix, Matrix) {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut features = Vec::with_capacity(config.n_samples);
    let mut targets = Vec::with_capacity(config.n_samples);

    for _ in 0..config.n_samples {
        let row: Vec<f64> = (0..config.n_features)
            .map(|_| rng.gen_range(-2.0..2.0))
            .collect();
        let mut one_hot = vec![0.0; FRONTIER_CLASSES];
        one_hot[frontier_class(&row)] = 1.0;
        features.push(row);
        targets.push(one_hot);
    }

    (
        Matrix { rows: config.n_samples, cols: config.n_features, data: features },
        Matrix { rows: config.n_samples, cols: FRONTIER_CLASSES, data: targets },
    )
}
