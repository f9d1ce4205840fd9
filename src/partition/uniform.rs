use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{NetworkError, Result};

/// Shuffles `[0, num_ints)` and slices it into batches of `set_size`; the
/// last batch holds the remainder.
#[derive(Debug, Clone)]
pub struct UniformPartitioner {
    num_ints: usize,
    set_size: usize,
}

impl UniformPartitioner {
    pub fn new(num_ints: usize, set_size: usize) -> Result<UniformPartitioner> {
        check_sizes(num_ints, set_size)?;
        Ok(UniformPartitioner { num_ints, set_size })
    }

    pub fn num_ints(&self) -> usize {
        self.num_ints
    }

    pub fn set_size(&self) -> usize {
        self.set_size
    }

    pub fn num_batches(&self) -> usize {
        self.num_ints.div_ceil(self.set_size)
    }

    pub fn partition<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Vec<usize>> {
        let mut indices: Vec<usize> = (0..self.num_ints).collect();
        indices.shuffle(rng);
        indices.chunks(self.set_size).map(<[usize]>::to_vec).collect()
    }
}

/// Both sizes positive and a batch no larger than the population.
pub(crate) fn check_sizes(num_ints: usize, set_size: usize) -> Result<()> {
    if num_ints == 0 || set_size == 0 {
        return Err(NetworkError::InvalidPartition(format!(
            "number of indices ({num_ints}) and set size ({set_size}) must be positive"
        )));
    }
    if set_size > num_ints {
        return Err(NetworkError::InvalidPartition(format!(
            "set size ({set_size}) cannot be greater than the number of indices ({num_ints})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn batches_are_a_disjoint_cover() {
        let mut rng = StdRng::seed_from_u64(11);
        for (n, size) in [(10, 3), (12, 4), (7, 7), (1, 1), (100, 16)] {
            let partitioner = UniformPartitioner::new(n, size).unwrap();
            let batches = partitioner.partition(&mut rng);
            assert_eq!(batches.len(), partitioner.num_batches());
            assert!(batches[..batches.len() - 1].iter().all(|b| b.len() == size));
            assert!(batches.last().unwrap().len() <= size);

            let mut all: Vec<usize> = batches.into_iter().flatten().collect();
            all.sort_unstable();
            assert_eq!(all, (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn same_seed_same_partition() {
        let partitioner = UniformPartitioner::new(20, 6).unwrap();
        let a = partitioner.partition(&mut StdRng::seed_from_u64(3));
        let b = partitioner.partition(&mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(UniformPartitioner::new(0, 1).is_err());
        assert!(UniformPartitioner::new(5, 0).is_err());
        assert!(matches!(UniformPartitioner::new(5, 6), Err(NetworkError::InvalidPartition(_))));
    }
}
