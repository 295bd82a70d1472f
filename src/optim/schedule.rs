/// Base learning rate every backward step starts from.
pub const BASE_LEARNING_RATE: f64 = 0.1;

/// Per-unit-of-scar-activity boost applied to the base rate.
pub const ACTIVITY_BOOST: f64 = 3.0;

/// Hyperbolic time-decay coefficient per epoch.
pub const TIME_DECAY: f64 = 0.01;

/// Learning rate for one step:
///
///   base_lr * (1 + 3 * scar_activity) / (1 + 0.01 * epoch)
///
/// Non-increasing in `epoch`, increasing in `scar_activity`. Negative
/// activity lowers the rate below the decayed base.
pub fn adaptive_learning_rate(base_lr: f64, epoch: usize, scar_activity: f64) -> f64 {
    let scar_boost = 1.0 + scar_activity * ACTIVITY_BOOST;
    let time_decay = 1.0 / (1.0 + epoch as f64 * TIME_DECAY);
    base_lr * scar_boost * time_decay
}

/// Activity-scaled step size used for hidden-layer updates:
/// `lr * (1 + 8 * scar_activity)`.
pub fn substrate_scale(lr: f64, scar_activity: f64) -> f64 {
    lr * (1.0 + scar_activity * 8.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_activity_is_pure_decay() {
        assert_eq!(adaptive_learning_rate(0.1, 0, 0.0), 0.1);
        assert!((adaptive_learning_rate(0.1, 100, 0.0) - 0.05).abs() < 1e-15);
    }

    #[test]
    fn test_non_increasing_in_epoch() {
        for &activity in &[-0.2, 0.0, 0.05, 1.5] {
            let mut prev = adaptive_learning_rate(BASE_LEARNING_RATE, 0, activity);
            for epoch in 1..500 {
                let lr = adaptive_learning_rate(BASE_LEARNING_RATE, epoch, activity);
                assert!(lr <= prev, "epoch {epoch} activity {activity}");
                prev = lr;
            }
        }
    }

    #[test]
    fn test_strictly_increasing_in_activity() {
        for &epoch in &[0, 7, 99] {
            let mut prev = adaptive_learning_rate(BASE_LEARNING_RATE, epoch, -0.3);
            for step in 1..200 {
                let activity = -0.3 + step as f64 * 0.01;
                let lr = adaptive_learning_rate(BASE_LEARNING_RATE, epoch, activity);
                assert!(lr > prev);
                prev = lr;
            }
        }
    }

    #[test]
    fn test_negative_activity_reduces_rate() {
        assert!(adaptive_learning_rate(0.1, 0, -0.1) < 0.1);
    }

    #[test]
    fn test_substrate_scale() {
        assert_eq!(substrate_scale(0.1, 0.0), 0.1);
        assert!((substrate_scale(0.1, 0.5) - 0.5).abs() < 1e-15);
    }
}
