use serde::{Serialize, Deserialize};

use crate::error::{Result, SubstrateError};

/// Seed used for parameter initialization unless one is given.
pub const DEFAULT_INIT_SEED: u64 = 42;

/// Architecture of a substrate network: input width, ordered hidden widths,
/// output width, and the seed its parameters are drawn with.
///
/// The hidden list may be empty, which leaves a single softmax layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    #[serde(default = "default_input_dim")]
    pub input_dim: usize,
    #[serde(default = "default_hidden_dims")]
    pub hidden_dims: Vec<usize>,
    #[serde(default = "default_output_dim")]
    pub output_dim: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_input_dim() -> usize { 10 }
fn default_hidden_dims() -> Vec<usize> { vec![25, 20] }
fn default_output_dim() -> usize { 3 }
fn default_seed() -> u64 { DEFAULT_INIT_SEED }

impl Default for NetworkSpec {
    fn default() -> Self {
        NetworkSpec {
            input_dim: default_input_dim(),
            hidden_dims: default_hidden_dims(),
            output_dim: default_output_dim(),
            seed: default_seed(),
        }
    }
}

impl NetworkSpec {
    pub fn new(input_dim: usize, hidden_dims: Vec<usize>, output_dim: usize) -> Self {
        NetworkSpec { input_dim, hidden_dims, output_dim, seed: DEFAULT_INIT_SEED }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// `(size, input_size)` for every layer, hidden layers first, output last.
    pub fn layer_shapes(&self) -> Vec<(usize, usize)> {
        let mut shapes = Vec::with_capacity(self.hidden_dims.len() + 1);
        let mut prev_dim = self.input_dim;
        for &dim in &self.hidden_dims {
            shapes.push((dim, prev_dim));
            prev_dim = dim;
        }
        shapes.push((self.output_dim, prev_dim));
        shapes
    }

    /// Rejects zero-width layers. Only used for specs read from disk; the
    /// numeric core trusts its caller.
    pub fn validate(&self) -> Result<()> {
        if self.input_dim == 0 || self.output_dim == 0 {
            return Err(SubstrateError::InvalidConfig(
                "input_dim and output_dim must be positive".into(),
            ));
        }
        if let Some(pos) = self.hidden_dims.iter().position(|&d| d == 0) {
            return Err(SubstrateError::InvalidConfig(format!(
                "hidden layer {pos} has zero width"
            )));
        }
        Ok(())
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let spec: NetworkSpec = serde_json::from_reader(reader)?;
        spec.validate()?;
        Ok(spec)
    }
}
