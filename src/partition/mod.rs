//! Batch samplers feeding the learners: a plain shuffled cover of the data
//! and a class/bin-stratified sampler drawing with replacement.

pub mod uniform;
pub mod weighted;

use rand::Rng;

pub use uniform::UniformPartitioner;
pub use weighted::WeightedPartitioner;

/// The partitioning strategy a learner was built with.
#[derive(Debug, Clone)]
pub enum Partitioner {
    Uniform(UniformPartitioner),
    Weighted(WeightedPartitioner),
}

impl Partitioner {
    /// One epoch's worth of batches of datapoint indices.
    pub fn partition<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Vec<usize>> {
        match self {
            Partitioner::Uniform(p) => p.partition(rng),
            Partitioner::Weighted(p) => p.partition(rng),
        }
    }

    pub fn num_batches(&self) -> usize {
        match self {
            Partitioner::Uniform(p) => p.num_batches(),
            Partitioner::Weighted(p) => p.num_batches(),
        }
    }

    pub fn is_weighted(&self) -> bool {
        matches!(self, Partitioner::Weighted(_))
    }
}
