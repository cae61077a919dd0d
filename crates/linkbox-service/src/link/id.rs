//! Link identifier generation.

use rand::distr::{Alphanumeric, SampleString};

/// Produces candidate link identifiers.
pub trait IdGenerator: Send + Sync + std::fmt::Debug + 'static {
    /// Generate an identifier of exactly `len` characters.
    fn generate(&self, len: usize) -> String;
}

/// Uniform random identifiers over `[A-Za-z0-9]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self, len: usize) -> String {
        Alphanumeric.sample_string(&mut rand::rng(), len)
    }
}
