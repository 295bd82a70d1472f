use serde::{Serialize, Deserialize};

/// Per-epoch training statistics recorded by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 0-based epoch index, as passed to the learning-rate schedule.
    pub epoch: usize,
    /// Fraction of samples whose argmax prediction matches the target,
    /// measured before this epoch's update.
    pub accuracy: f64,
    /// Mean cross-entropy of the same forward pass.
    pub loss: f64,
    /// Scar activity recorded by this epoch's backward step.
    pub scar_activity: f64,
    /// Output-layer learning rate of this epoch's backward step.
    pub learning_rate: f64,
    /// Whether the plateau check perturbed the weights after this epoch.
    pub boosted: bool,
}
