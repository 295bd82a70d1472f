use crate::math::matrix::Matrix;

/// Scaling applied to the pairwise interaction sum.
pub const SCAR_SCALE: f64 = 0.02;

/// Pairwise interaction term of a pre-activation vector:
///
///   scar(z) = 0.02 * Σ_{i<j} z_i * z_j
///
/// Defined for any length; the empty and singleton vectors have no pairs and
/// yield `0.0`.
pub fn scar_operator(z: &[f64]) -> f64 {
    let mut scar_value = 0.0;
    for i in 0..z.len() {
        for j in (i + 1)..z.len() {
            scar_value += z[i] * z[j] * SCAR_SCALE;
        }
    }
    scar_value
}

/// `scar_operator` applied independently to every sample row of a batch.
pub fn scar_rows(z: &Matrix) -> Vec<f64> {
    z.data.iter().map(|row| scar_operator(row)).collect()
}

/// Mean scar value over the rows of a batch; `0.0` for an empty batch.
pub fn mean_scar(z: &Matrix) -> f64 {
    if z.rows == 0 {
        return 0.0;
    }
    scar_rows(z).iter().sum::<f64>() / z.rows as f64
}
