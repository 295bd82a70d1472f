pub mod frontier;

pub use frontier::{generate_frontier_dataset, frontier_class, DatasetConfig};
