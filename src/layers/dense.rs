use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// One trainable (weights, biases) pair.
///
/// `weights` has shape (size, input_size): row `i` holds the incoming
/// connections of neuron `i`. `biases` has length `size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer{
    pub size: usize,
    pub input_size: usize,
    pub weights: Matrix,
    pub biases: Vec<f64>,
    pub activator: ActivationFunction
}

impl Layer {
    /// He-initialized weights drawn from `rng`, zero biases.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        Layer {
            size,
            input_size,
            weights: Matrix::he(size, input_size, rng),
            biases: vec![0.0; size],
            activator: activation
        }
    }

    /// Linear pre-activation `z = input · Wᵀ + b` for a batch of rows.
    pub fn linear(&self, input: &Matrix) -> Matrix {
        if input.cols != self.input_size {
            panic!(
                "Layer expects {} input features, batch has {}",
                self.input_size, input.cols
            )
        }
        input.dot(&self.weights.transpose()).add_row_broadcast(&self.biases)
    }

    /// Weight and bias gradients for a batch, averaged over its rows.
    ///
    /// `layer_delta` is ∂L/∂z for this layer (rows = samples) and `inputs`
    /// the activations that fed it. Returns `(δᵀ · inputs / m, mean(δ))`,
    /// shaped like `(weights, biases)`.
    pub fn compute_gradients(&self, layer_delta: &Matrix, inputs: &Matrix) -> (Matrix, Vec<f64>) {
        let m = layer_delta.rows as f64;
        let weights_grad = layer_delta.transpose().dot(inputs).scale(1.0 / m);
        let biases_grad = layer_delta.column_means();
        (weights_grad, biases_grad)
    }

    /// Applies pre-computed gradients scaled by `lr`.
    pub fn apply_gradients(&mut self, weights_grad: &Matrix, biases_grad: &[f64], lr: f64) {
        if biases_grad.len() != self.biases.len() {
            panic!("Bias gradient has {} entries for {} biases", biases_grad.len(), self.biases.len())
        }
        self.weights.sub_scaled_assign(weights_grad, lr);
        for (b, g) in self.biases.iter_mut().zip(biases_grad.iter()) {
            *b -= lr * g;
        }
    }

    /// Adds independent N(0, scale²) noise to every weight. Biases are left alone.
    pub fn perturb<R: Rng + ?Sized>(&mut self, scale: f64, rng: &mut R) {
        let noise = Matrix::gaussian(self.weights.rows, self.weights.cols, scale, rng);
        self.weights = self.weights.clone() + noise;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_layer_shapes_and_zero_biases() {
        let mut rng = StdRng::seed_from_u64(42);
        let layer = Layer::new(4, 3, ActivationFunction::ReLU, &mut rng);
        assert_eq!((layer.weights.rows, layer.weights.cols), (4, 3));
        assert_eq!(layer.biases, vec![0.0; 4]);
    }

    #[test]
    fn test_linear_applies_weights_and_bias() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut layer = Layer::new(2, 3, ActivationFunction::ReLU, &mut rng);
        layer.weights = Matrix::from_data(vec![vec![1.0, 0.0, -1.0], vec![0.5, 0.5, 0.5]]);
        layer.biases = vec![0.1, -0.1];
        let x = Matrix::from_data(vec![vec![1.0, 2.0, 3.0], vec![0.0, 0.0, 0.0]]);
        let z = layer.linear(&x);
        assert!((z.data[0][0] - (-2.0 + 0.1)).abs() < 1e-12);
        assert!((z.data[0][1] - (3.0 - 0.1)).abs() < 1e-12);
        assert_eq!(z.data[1], vec![0.1, -0.1]);
    }

    #[test]
    #[should_panic(expected = "input features")]
    fn test_linear_rejects_wrong_width() {
        let mut rng = StdRng::seed_from_u64(42);
        let layer = Layer::new(2, 3, ActivationFunction::ReLU, &mut rng);
        layer.linear(&Matrix::zeros(5, 4));
    }

    #[test]
    fn test_gradients_are_batch_means() {
        let mut rng = StdRng::seed_from_u64(42);
        let layer = Layer::new(1, 2, ActivationFunction::ReLU, &mut rng);
        let delta = Matrix::from_data(vec![vec![1.0], vec![3.0]]);
        let inputs = Matrix::from_data(vec![vec![2.0, 0.0], vec![0.0, 4.0]]);
        let (dw, db) = layer.compute_gradients(&delta, &inputs);
        assert_eq!(dw.data, vec![vec![1.0, 6.0]]);
        assert_eq!(db, vec![2.0]);
    }

    #[test]
    fn test_perturb_leaves_biases_untouched() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut layer = Layer::new(3, 3, ActivationFunction::ReLU, &mut rng);
        layer.biases = vec![0.5, 0.25, -1.0];
        let before = layer.clone();
        layer.perturb(0.001, &mut rng);
        assert_eq!(layer.biases, before.biases);
        assert_ne!(layer.weights, before.weights);
        let max_shift = layer.weights.data.iter().flatten()
            .zip(before.weights.data.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        assert!(max_shift < 0.01);
    }
}
