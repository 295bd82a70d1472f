use crate::math::matrix::Matrix;

/// Categorical cross-entropy loss for use with a Softmax output layer.
pub struct CrossEntropyLoss;

/// Small epsilon added inside log() to prevent log(0) = -inf.
const EPS: f64 = 1e-12;

impl CrossEntropyLoss {
    /// Computes the scalar cross-entropy loss of one sample:
    ///   L = -sum(expected[i] * log(predicted[i] + eps))
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(p, e)| -e * (p + EPS).ln())
            .sum()
    }

    /// Mean per-sample loss over a batch of softmax rows and one-hot targets.
    pub fn batch_loss(predicted: &Matrix, expected: &Matrix) -> f64 {
        if predicted.rows != expected.rows || predicted.cols != expected.cols {
            panic!("Predictions and targets are of incorrect sizes")
        }
        if predicted.rows == 0 {
            return 0.0;
        }
        let total: f64 = predicted.data.iter().zip(expected.data.iter())
            .map(|(p, e)| CrossEntropyLoss::loss(p, e))
            .sum();
        total / predicted.rows as f64
    }

    /// Gradient of the combined Softmax + cross-entropy w.r.t. the output
    /// logits, for a whole batch:
    ///   ∂L/∂z = predicted - expected   (element-wise)
    pub fn delta(predicted: &Matrix, expected: &Matrix) -> Matrix {
        predicted.clone() - expected.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confident_correct_prediction_has_low_loss() {
        let good = CrossEntropyLoss::loss(&[0.98, 0.01, 0.01], &[1.0, 0.0, 0.0]);
        let bad = CrossEntropyLoss::loss(&[0.01, 0.98, 0.01], &[1.0, 0.0, 0.0]);
        assert!(good < 0.05);
        assert!(bad > 4.0);
    }

    #[test]
    fn test_batch_loss_and_delta() {
        let p = Matrix::from_data(vec![vec![0.5, 0.5], vec![0.25, 0.75]]);
        let y = Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let expected = -((0.5_f64 + EPS).ln() + (0.75_f64 + EPS).ln()) / 2.0;
        assert!((CrossEntropyLoss::batch_loss(&p, &y) - expected).abs() < 1e-12);
        let d = CrossEntropyLoss::delta(&p, &y);
        assert_eq!(d.data, vec![vec![-0.5, 0.5], vec![0.25, -0.25]]);
    }
}
