use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// The two activations a substrate network uses: ReLU on every hidden layer
/// and Softmax on the output layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    ReLU,
    /// Softmax is a vector-valued activation; it is applied row by row in
    /// `apply()`. The element-wise `function()` is not defined for it.
    Softmax,
}

impl ActivationFunction {
    /// Element-wise activation. For `Softmax`, call `apply()` which
    /// normalizes whole rows; this path should not be reached.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Softmax => {
                panic!("ActivationFunction::Softmax::function() must not be called directly; \
                        use apply() which normalizes each row.")
            }
        }
    }

    /// Element-wise derivative of the activation.
    ///
    /// For `ReLU` this is the 0/1 step mask. For `Softmax` the network pairs
    /// it with cross-entropy and the combined gradient is
    /// `predicted - expected`, so `1.0` passes that delta through unchanged.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Softmax => 1.0,
        }
    }

    /// Applies the activation to a batch (rows = samples).
    pub fn apply(&self, z: &Matrix) -> Matrix {
        match self {
            ActivationFunction::ReLU => z.map(|x| self.function(x)),
            ActivationFunction::Softmax => softmax_rows(z),
        }
    }

    /// Derivative evaluated element-wise over a batch of pre-activations.
    pub fn derivative_mask(&self, z: &Matrix) -> Matrix {
        z.map(|x| self.derivative(x))
    }
}

/// Row-wise softmax with max subtraction: each row's maximum is subtracted
/// before exponentiating, then the row is normalized by its sum.
pub fn softmax_rows(z: &Matrix) -> Matrix {
    let data = z.data.iter()
        .map(|row| {
            let max = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let exps: Vec<f64> = row.iter().map(|x| (x - max).exp()).collect();
            let sum: f64 = exps.iter().sum();
            exps.into_iter().map(|e| e / sum).collect()
        })
        .collect();
    Matrix { rows: z.rows, cols: z.cols, data }
}
