pub mod cache;
pub mod network;
pub mod spec;

pub use cache::ActivationCache;
pub use network::{SubstrateNetwork, StepTelemetry};
pub use spec::NetworkSpec;
