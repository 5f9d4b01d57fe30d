//! Concrete policy provider: a small fixed-topology feed-forward
//! network implementing the `foobartory-strategy` [`Policy`] seam.
//!
//! Topology: 6 inputs, one hidden layer of 16 relu6 units, 5 softmax
//! outputs (one per operation kind). Weights start Glorot-uniform,
//! biases start Gaussian. Evolution works directly on the raw
//! parameters: mutation replaces individual parameters with fresh
//! Gaussian draws, crossover interleaves the two parents' parameters
//! within each layer. Persistence is plain JSON.
//!
//! [`Policy`]: foobartory_strategy::Policy

pub mod error;
pub mod math;
pub mod mlp;

pub use error::PolicyError;
pub use mlp::MlpPolicy;
