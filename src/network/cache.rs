use crate::math::matrix::Matrix;

/// Intermediate values of one forward pass, consumed by the paired backward
/// pass of the same step.
///
/// `pre_activations[l]` is layer `l`'s pre-activation (scar-enhanced for
/// hidden layers, raw logits for the output layer). `activations[0]` is the
/// input batch and `activations[l + 1]` the output of layer `l`, so there is
/// always one more activation than pre-activation.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationCache {
    pub pre_activations: Vec<Matrix>,
    pub activations: Vec<Matrix>,
}

impl ActivationCache {
    pub fn new(input: Matrix) -> Self {
        ActivationCache {
            pre_activations: Vec::new(),
            activations: vec![input],
        }
    }

    pub fn push(&mut self, pre_activation: Matrix, activation: Matrix) {
        self.pre_activations.push(pre_activation);
        self.activations.push(activation);
    }

    /// Number of layers recorded.
    pub fn depth(&self) -> usize {
        self.pre_activations.len()
    }

    pub fn input(&self) -> &Matrix {
        &self.activations[0]
    }

    /// Final layer's activation (the softmax output once the pass is complete).
    pub fn output(&self) -> &Matrix {
        &self.activations[self.activations.len() - 1]
    }
}
