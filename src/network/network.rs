use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::{
    activation::activation::ActivationFunction,
    layers::dense::Layer,
    loss::cross_entropy::CrossEntropyLoss,
    math::matrix::Matrix,
    metrics::substrate::{ScarMemory, SubstrateMetrics},
    network::cache::ActivationCache,
    network::spec::NetworkSpec,
    optim::schedule::{adaptive_learning_rate, substrate_scale, BASE_LEARNING_RATE},
    scar::operator::{mean_scar, scar_rows},
};

/// Learning rate and scar activity used by one backward step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTelemetry {
    pub epoch: usize,
    pub scar_activity: f64,
    pub learning_rate: f64,
    pub hidden_step_size: f64,
}

/// Feed-forward classifier whose hidden pre-activations carry a per-sample
/// scar offset.
///
/// `layers` is the parameter store: one ReLU layer per hidden width followed
/// by a softmax output layer. The network also owns the activation cache of
/// the most recent forward pass and the scar memory fed by every backward
/// pass.
#[derive(Debug, Clone)]
pub struct SubstrateNetwork {
    pub layers: Vec<Layer>,
    cache: Option<ActivationCache>,
    memory: ScarMemory,
    last_step: Option<StepTelemetry>,
}

impl SubstrateNetwork {
    /// Builds the layers described by `spec`, drawing every weight from `rng`.
    pub fn new<R: Rng + ?Sized>(spec: &NetworkSpec, rng: &mut R) -> SubstrateNetwork {
        let shapes = spec.layer_shapes();
        let output_idx = shapes.len() - 1;
        let layers = shapes.into_iter()
            .enumerate()
            .map(|(i, (size, input_size))| {
                let activation = if i == output_idx {
                    ActivationFunction::Softmax
                } else {
                    ActivationFunction::ReLU
                };
                Layer::new(size, input_size, activation, rng)
            })
            .collect();

        SubstrateNetwork {
            layers,
            cache: None,
            memory: ScarMemory::new(),
            last_step: None,
        }
    }

    /// Builds the network from a fresh generator seeded with `spec.seed`.
    /// Two calls with equal specs yield bit-identical parameters.
    pub fn seeded(spec: &NetworkSpec) -> SubstrateNetwork {
        let mut rng = StdRng::seed_from_u64(spec.seed);
        SubstrateNetwork::new(spec, &mut rng)
    }

    pub fn num_hidden(&self) -> usize {
        self.layers.len() - 1
    }

    pub fn input_dim(&self) -> usize {
        self.layers[0].input_size
    }

    pub fn output_dim(&self) -> usize {
        self.layers[self.layers.len() - 1].size
    }

    /// Runs the batch through every layer without touching the network.
    ///
    /// Hidden layer: `z = a · Wᵀ + b`, then `z' = z + scar(z_row)` per sample,
    /// then `a = relu(z')`. Output layer: raw logits through a row softmax.
    pub fn propagate(&self, input: &Matrix) -> ActivationCache {
        let mut cache = ActivationCache::new(input.clone());
        let mut current = input.clone();
        let hidden = self.num_hidden();

        for (idx, layer) in self.layers.iter().enumerate() {
            let z = layer.linear(&current);
            let z = if idx < hidden {
                z.add_per_row(&scar_rows(&z))
            } else {
                z
            };
            let a = layer.activator.apply(&z);
            cache.push(z, a.clone());
            current = a;
        }

        cache
    }

    /// Forward pass; keeps the activation cache for the next `backward()`.
    /// Returns the softmax output (rows = samples, columns = classes).
    pub fn forward(&mut self, input: &Matrix) -> Matrix {
        let cache = self.propagate(input);
        let output = cache.output().clone();
        self.cache = Some(cache);
        output
    }

    /// Class probabilities for a batch, leaving the cache untouched.
    pub fn predict(&self, input: &Matrix) -> Matrix {
        self.propagate(input).output().clone()
    }

    /// Backward pass and in-place update for the batch last given to
    /// `forward()`. Consumes the activation cache.
    ///
    /// The output layer steps with the adaptive rate; every hidden layer
    /// steps with `lr * (1 + 8 * scar_activity)`, where both values come from
    /// this step's last-hidden-layer scar activity. The ReLU mask is taken
    /// from the scar-enhanced pre-activation and the scar offset itself is
    /// treated as a constant, so its own derivative is not propagated.
    ///
    /// # Panics
    /// Panics if no forward pass preceded this call, or if `targets` does not
    /// match the cached output's shape.
    pub fn backward(&mut self, input: &Matrix, targets: &Matrix, epoch: usize) {
        let cache = match self.cache.take() {
            Some(cache) => cache,
            None => panic!("backward() requires a preceding forward() in the same step"),
        };
        if cache.depth() != self.layers.len() {
            panic!("Activation cache holds {} layers, network has {}", cache.depth(), self.layers.len())
        }

        let output_idx = self.layers.len() - 1;

        // Softmax + cross-entropy: ∂L/∂z_out = a_out - y.
        let delta = CrossEntropyLoss::delta(cache.output(), targets);
        let (w_grad, b_grad) = self.layers[output_idx]
            .compute_gradients(&delta, &cache.activations[output_idx]);

        let scar_activity = if output_idx > 0 {
            mean_scar(&cache.pre_activations[output_idx - 1])
        } else {
            0.0
        };
        self.memory.metabolize(scar_activity);

        let lr = adaptive_learning_rate(BASE_LEARNING_RATE, epoch, scar_activity);
        self.layers[output_idx].apply_gradients(&w_grad, &b_grad, lr);

        let hidden_step_size = substrate_scale(lr, scar_activity);
        let mut error = delta;
        for idx in (0..output_idx).rev() {
            let mask = self.layers[idx].activator.derivative_mask(&cache.pre_activations[idx]);
            // Propagate through the layer above, already updated this step.
            error = error.dot(&self.layers[idx + 1].weights).hadamard(&mask);

            let prev_activation = if idx == 0 { input } else { &cache.activations[idx] };
            let (w_grad, b_grad) = self.layers[idx].compute_gradients(&error, prev_activation);
            self.layers[idx].apply_gradients(&w_grad, &b_grad, hidden_step_size);
        }

        trace!(epoch, scar_activity, lr, hidden_step_size, "backward step applied");
        self.last_step = Some(StepTelemetry {
            epoch,
            scar_activity,
            learning_rate: lr,
            hidden_step_size,
        });
    }

    /// Adds N(0, scale²) noise to every weight matrix; biases are untouched.
    pub fn substrate_boost<R: Rng + ?Sized>(&mut self, scale: f64, rng: &mut R) {
        for layer in &mut self.layers {
            layer.perturb(scale, rng);
        }
    }

    /// Cache of the last forward pass, if the paired backward has not run yet.
    pub fn cache(&self) -> Option<&ActivationCache> {
        self.cache.as_ref()
    }

    pub fn scar_memory(&self) -> &ScarMemory {
        &self.memory
    }

    pub fn last_step(&self) -> Option<StepTelemetry> {
        self.last_step
    }

    pub fn metrics(&self) -> SubstrateMetrics {
        self.memory.metrics()
    }
}
