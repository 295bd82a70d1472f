pub mod substrate;

pub use substrate::{ScarMemory, SubstrateMetrics, COHERENCE_WINDOW};
