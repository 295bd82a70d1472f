pub mod schedule;

pub use schedule::{adaptive_learning_rate, substrate_scale, BASE_LEARNING_RATE};
